//! HTTP request handlers for the Ghostwriter API.
//!
//! Handlers follow a consistent pattern: authenticate first, validate input,
//! trace each stage, and map every failure to one of the three externally
//! observable outcomes (unauthorized, ignored/ok, internal error).

pub mod health;
pub mod webhook;

pub use health::{health_check, liveness_check, readiness_check};
pub use webhook::vapi_webhook;
