//! Note store abstraction over durable object storage.
//!
//! The store is an opaque key-value blob collaborator with last-writer-wins
//! semantics for same-key writes. Production uses S3; tests use the in-memory
//! mock to assert exact write behavior without network dependencies.

use std::{future::Future, pin::Pin};

use bytes::Bytes;

use crate::error::{IngestError, Result};

/// Durable storage operations required by the webhook pipeline.
///
/// Ingestion only ever writes, so a single operation suffices. Any
/// implementation, real or test double, satisfies the same interface.
pub trait NoteStore: Send + Sync + 'static {
    /// Writes a rendered note at `key`, declaring its content type.
    ///
    /// Same-key writes overwrite; the store provides no ordering guarantee
    /// between concurrent writers.
    fn put_note(
        &self,
        key: String,
        body: Bytes,
        content_type: String,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Production note store backed by S3.
#[derive(Debug, Clone)]
pub struct S3NoteStore {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3NoteStore {
    /// Creates a store from an existing SDK client.
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self { client, bucket: bucket.into() }
    }

    /// Creates a store using ambient AWS configuration (credentials chain,
    /// region resolution).
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(aws_sdk_s3::Client::new(&sdk_config), bucket)
    }

    /// The destination bucket name.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

impl NoteStore for S3NoteStore {
    fn put_note(
        &self,
        key: String,
        body: Bytes,
        content_type: String,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        Box::pin(async move {
            self.client
                .put_object()
                .bucket(&self.bucket)
                .key(&key)
                .body(aws_sdk_s3::primitives::ByteStream::from(body))
                .content_type(&content_type)
                .send()
                .await
                .map_err(|e| IngestError::storage(e.to_string()))?;

            Ok(())
        })
    }
}

pub mod mock {
    //! In-memory note store for testing.
    //!
    //! Records every write and supports failure injection so tests can
    //! assert exact write counts, including zero.

    use std::{future::Future, pin::Pin, sync::Arc};

    use bytes::Bytes;
    use tokio::sync::RwLock;

    use super::NoteStore;
    use crate::error::{IngestError, Result};

    /// A single recorded write.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedNote {
        /// Storage key the note was written under.
        pub key: String,
        /// Note bytes.
        pub body: Bytes,
        /// Declared content type.
        pub content_type: String,
    }

    /// In-memory note store recording all writes.
    #[derive(Debug, Clone, Default)]
    pub struct MemoryNoteStore {
        notes: Arc<RwLock<Vec<RecordedNote>>>,
        put_error: Arc<RwLock<Option<String>>>,
    }

    impl MemoryNoteStore {
        /// Creates an empty store.
        pub fn new() -> Self {
            Self::default()
        }

        /// Makes the next and all subsequent writes fail with `message`.
        pub async fn inject_put_error(&self, message: impl Into<String>) {
            *self.put_error.write().await = Some(message.into());
        }

        /// Returns all recorded writes in order.
        pub async fn recorded_notes(&self) -> Vec<RecordedNote> {
            self.notes.read().await.clone()
        }

        /// Returns how many writes were performed.
        pub async fn write_count(&self) -> usize {
            self.notes.read().await.len()
        }

        /// Returns the note at `key`, if one was written.
        pub async fn find(&self, key: &str) -> Option<RecordedNote> {
            self.notes.read().await.iter().rev().find(|n| n.key == key).cloned()
        }
    }

    impl NoteStore for MemoryNoteStore {
        fn put_note(
            &self,
            key: String,
            body: Bytes,
            content_type: String,
        ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
            let notes = self.notes.clone();
            let put_error = self.put_error.clone();

            Box::pin(async move {
                if let Some(message) = put_error.read().await.clone() {
                    return Err(IngestError::storage(message));
                }

                notes.write().await.push(RecordedNote { key, body, content_type });
                Ok(())
            })
        }
    }

}
