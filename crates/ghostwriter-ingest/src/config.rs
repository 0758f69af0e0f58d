//! Configuration management for the Ghostwriter ingest service.

use std::{net::SocketAddr, str::FromStr};

use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

const CONFIG_FILE: &str = "config.toml";

/// Complete service configuration with defaults, file, and environment
/// overrides.
///
/// Configuration is loaded in priority order:
/// 1. Environment variables (highest priority)
/// 2. Configuration file (`config.toml`)
/// 3. Built-in defaults (lowest priority)
///
/// The secret token and bucket name have no usable defaults and must be
/// provided by the environment or the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Shared secret expected in the `x-vapi-secret` header.
    ///
    /// Environment variable: `SECRET_TOKEN`
    #[serde(default, alias = "SECRET_TOKEN")]
    pub secret_token: String,

    /// Destination bucket for rendered notes.
    ///
    /// Environment variable: `BUCKET_NAME`
    #[serde(default, alias = "BUCKET_NAME")]
    pub bucket_name: String,

    /// Server bind address.
    ///
    /// Environment variable: `HOST`
    #[serde(default = "default_host", alias = "HOST")]
    pub host: String,

    /// Server bind port.
    ///
    /// Environment variable: `PORT`
    #[serde(default = "default_port", alias = "PORT")]
    pub port: u16,

    /// HTTP request timeout in seconds.
    ///
    /// Environment variable: `REQUEST_TIMEOUT`
    #[serde(default = "default_request_timeout", alias = "REQUEST_TIMEOUT")]
    pub request_timeout: u64,

    /// Log level configuration.
    ///
    /// Environment variable: `RUST_LOG`
    #[serde(default = "default_log_level", alias = "RUST_LOG")]
    pub rust_log: String,
}

impl IngestConfig {
    /// Load configuration from defaults, config file, and environment
    /// variable overrides.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(""));

        let config: Self = figment.extract().context("Failed to load configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Parse server socket address from host and port configuration.
    pub fn parse_server_addr(&self) -> Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.host, self.port);
        SocketAddr::from_str(&addr_str).context("Invalid server address")
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<()> {
        if self.secret_token.is_empty() {
            anyhow::bail!("SECRET_TOKEN must be set");
        }

        if self.bucket_name.is_empty() {
            anyhow::bail!("BUCKET_NAME must be set");
        }

        if self.port == 0 {
            anyhow::bail!("port must be greater than 0");
        }

        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            secret_token: String::new(),
            bucket_name: String::new(),
            host: default_host(),
            port: default_port(),
            request_timeout: default_request_timeout(),
            rust_log: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_request_timeout() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
