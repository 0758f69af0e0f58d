//! Deployment reconciler for the Ghostwriter Vapi assistant.
//!
//! Converges the remote assistant configuration to the desired state:
//! resolve by display name, create or update idempotently, then link the
//! phone number. A dry-run mode computes the intended action without
//! touching the remote API at all.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assistant;
pub mod client;
pub mod config;
pub mod error;
pub mod reconcile;

pub use assistant::{AssistantConfig, ASSISTANT_NAME};
pub use client::{Assistant, AssistantApi, PhoneNumberLink, VapiClient};
pub use config::DeployConfig;
pub use error::{DeployError, Result};
pub use reconcile::{reconcile, ReconcileOutcome};
