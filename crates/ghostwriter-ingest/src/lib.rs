//! Ghostwriter webhook HTTP API.
//!
//! Receives Vapi end-of-call reports, authenticates them against a shared
//! secret, renders each into a Markdown note, and persists it to the
//! configured note store.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::sync::Arc;

use ghostwriter_core::Clock;

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod server;
pub mod storage;

pub use config::IngestConfig;
pub use error::IngestError;
pub use server::{create_router, start_server};
pub use storage::NoteStore;

/// Shared application state threaded through the router.
///
/// Constructed once at startup; all configuration flows through here rather
/// than being read from the process environment ad hoc.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: Arc<IngestConfig>,
    /// Durable note store.
    pub store: Arc<dyn NoteStore>,
    /// Wall-clock source for note timestamps and keys.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Creates application state from its parts.
    pub fn new(config: IngestConfig, store: Arc<dyn NoteStore>, clock: Arc<dyn Clock>) -> Self {
        Self { config: Arc::new(config), store, clock }
    }
}
