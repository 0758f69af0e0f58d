//! Core domain types for the Ghostwriter voice-note pipeline.
//!
//! Provides the webhook payload model, the Markdown note renderer with its
//! deterministic storage-key scheme, and the clock abstraction the other
//! crates depend on. Everything here is pure: no I/O, no global state.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod models;
pub mod note;
pub mod time;

pub use models::{CallReport, WebhookEnvelope, WebhookMessage, END_OF_CALL_REPORT};
pub use note::{render_note, storage_key, NOTE_CONTENT_TYPE};
pub use time::{Clock, FixedClock, SystemClock};
