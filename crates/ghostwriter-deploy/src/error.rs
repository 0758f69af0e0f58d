//! Error types for deployment operations.
//!
//! Nothing here is recovered locally: every failure aborts the current
//! reconciliation run and propagates to the CLI entry point, which logs it
//! and terminates with a failure status. No retries anywhere.

use thiserror::Error;

/// Result type alias for deployment operations.
pub type Result<T> = std::result::Result<T, DeployError>;

/// Failures that can occur while deploying the assistant.
#[derive(Debug, Clone, Error)]
pub enum DeployError {
    /// The remote API answered with a non-success status.
    ///
    /// Carries the status code so callers can distinguish authorization
    /// failures from validation failures.
    #[error("remote API error: HTTP {status}: {message}")]
    Api {
        /// Response body or operation description.
        message: String,
        /// HTTP status code of the failed response.
        status: u16,
    },

    /// The request never produced a response.
    #[error("network error: {message}")]
    Network {
        /// Transport error description.
        message: String,
    },

    /// The remote API answered successfully with an undecodable body.
    #[error("invalid API response: {message}")]
    InvalidResponse {
        /// Decoder error description.
        message: String,
    },

    /// A required configuration value is absent or empty.
    #[error("missing required configuration: {name}")]
    MissingConfig {
        /// Name of the missing environment variable.
        name: String,
    },

    /// Configuration was present but unusable.
    #[error("configuration error: {message}")]
    Configuration {
        /// Configuration error description.
        message: String,
    },
}

impl DeployError {
    /// Creates a remote API error from a response status and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api { message: message.into(), status }
    }

    /// Creates a network error from a message.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network { message: message.into() }
    }

    /// Creates an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse { message: message.into() }
    }

    /// Creates a missing-configuration error naming the variable.
    pub fn missing_config(name: impl Into<String>) -> Self {
        Self::MissingConfig { name: name.into() }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into() }
    }

    /// Whether the remote rejected our credentials rather than our payload.
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Api { status: 401 | 403, .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_carry_the_status_code() {
        let error = DeployError::api(422, "bad payload");
        match error {
            DeployError::Api { status, .. } => assert_eq!(status, 422),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn auth_errors_identified_by_status() {
        assert!(DeployError::api(401, "no").is_auth_error());
        assert!(DeployError::api(403, "forbidden").is_auth_error());
        assert!(!DeployError::api(422, "bad payload").is_auth_error());
        assert!(!DeployError::network("refused").is_auth_error());
    }

    #[test]
    fn error_display_format() {
        assert_eq!(
            DeployError::api(500, "boom").to_string(),
            "remote API error: HTTP 500: boom"
        );
        assert_eq!(
            DeployError::missing_config("VAPI_PRIVATE_KEY").to_string(),
            "missing required configuration: VAPI_PRIVATE_KEY"
        );
    }
}
