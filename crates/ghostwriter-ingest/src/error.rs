//! Error types for webhook ingestion.
//!
//! The ingestion boundary admits exactly three externally observable
//! outcomes: unauthorized, ignored/ok, and internal error. Everything that
//! goes wrong past authentication flattens to a generic 500 so callers never
//! see a raw fault.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Failures that can occur while ingesting a webhook.
#[derive(Debug, Clone, Error)]
pub enum IngestError {
    /// Shared-secret header missing or not matching the configured value.
    #[error("unauthorized: secret token missing or invalid")]
    Unauthorized,

    /// Request body could not be decoded.
    #[error("malformed payload: {message}")]
    MalformedPayload {
        /// Decoder error description.
        message: String,
    },

    /// Durable store rejected the write.
    #[error("storage error: {message}")]
    Storage {
        /// Store error description.
        message: String,
    },

    /// Any other processing fault.
    #[error("internal error: {message}")]
    Internal {
        /// Fault description.
        message: String,
    },
}

impl IngestError {
    /// Creates a malformed-payload error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedPayload { message: message.into() }
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage { message: message.into() }
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal { message: message.into() }
    }

    /// Whether this failure is the caller's fault.
    ///
    /// Only authentication failures are; malformed bodies are deliberately
    /// reported as internal errors, matching the external contract.
    pub fn is_client_fault(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            Self::MalformedPayload { .. } | Self::Storage { .. } | Self::Internal { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            },
        };

        (status, body).into_response()
    }
}
