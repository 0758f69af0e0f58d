//! Configuration for the deployment CLI.
//!
//! All values come from the environment; missing required values surface as
//! typed errors naming the variable, so the entry point can report exactly
//! what to set.

use figment::{
    providers::{Env, Serialized},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{
    client::VAPI_BASE_URL,
    error::{DeployError, Result},
};

/// Runtime configuration for a deployment run.
///
/// Constructed once at startup and threaded through explicitly; nothing else
/// reads the process environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeployConfig {
    /// Vapi API credential.
    ///
    /// Environment variable: `VAPI_PRIVATE_KEY`
    // Figment lowercases env keys before matching, so each alias carries
    // both spellings.
    #[serde(default, alias = "VAPI_PRIVATE_KEY", alias = "vapi_private_key")]
    pub api_key: String,

    /// Callback URL the assistant reports end-of-call events to.
    ///
    /// Environment variable: `BACKEND_WEBHOOK_URL`
    #[serde(default, alias = "BACKEND_WEBHOOK_URL", alias = "backend_webhook_url")]
    pub server_url: String,

    /// Phone number to link to the assistant.
    ///
    /// Environment variable: `PHONE_NUMBER_ID`
    #[serde(default, alias = "PHONE_NUMBER_ID")]
    pub phone_number_id: String,

    /// Base URL of the Vapi API.
    ///
    /// Environment variable: `VAPI_BASE_URL`
    #[serde(default = "default_base_url", alias = "VAPI_BASE_URL", alias = "vapi_base_url")]
    pub base_url: String,
}

impl DeployConfig {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::MissingConfig` naming the first absent required
    /// variable, or `DeployError::Configuration` when extraction fails.
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Env::prefixed(""));

        let config: Self =
            figment.extract().map_err(|e| DeployError::configuration(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates that every required value is present.
    fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(DeployError::missing_config("VAPI_PRIVATE_KEY"));
        }

        if self.server_url.is_empty() {
            return Err(DeployError::missing_config("BACKEND_WEBHOOK_URL"));
        }

        if self.phone_number_id.is_empty() {
            return Err(DeployError::missing_config("PHONE_NUMBER_ID"));
        }

        Ok(())
    }
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            server_url: String::new(),
            phone_number_id: String::new(),
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    VAPI_BASE_URL.to_string()
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, env, sync::Mutex};

    use super::*;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    struct TestEnvGuard {
        _lock: std::sync::MutexGuard<'static, ()>,
        vars: Vec<String>,
        originals: HashMap<String, Option<String>>,
    }

    impl TestEnvGuard {
        fn new() -> Self {
            let lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            Self { _lock: lock, vars: Vec::new(), originals: HashMap::new() }
        }

        fn set_var(&mut self, key: &str, value: &str) {
            if !self.vars.contains(&key.to_string()) {
                self.originals.insert(key.to_string(), env::var(key).ok());
                self.vars.push(key.to_string());
            }
            env::set_var(key, value);
        }

        fn remove_var(&mut self, key: &str) {
            if !self.vars.contains(&key.to_string()) {
                self.originals.insert(key.to_string(), env::var(key).ok());
                self.vars.push(key.to_string());
            }
            env::remove_var(key);
        }
    }

    impl Drop for TestEnvGuard {
        fn drop(&mut self) {
            for var in &self.vars {
                match self.originals.get(var) {
                    Some(Some(value)) => env::set_var(var, value),
                    Some(None) => env::remove_var(var),
                    None => {},
                }
            }
        }
    }

    #[test]
    fn load_succeeds_with_all_required_vars() {
        let mut guard = TestEnvGuard::new();
        guard.set_var("VAPI_PRIVATE_KEY", "sk_test");
        guard.set_var("BACKEND_WEBHOOK_URL", "https://cb.example/");
        guard.set_var("PHONE_NUMBER_ID", "phn_1");

        let config = DeployConfig::load().expect("config should load");

        assert_eq!(config.api_key, "sk_test");
        assert_eq!(config.server_url, "https://cb.example/");
        assert_eq!(config.phone_number_id, "phn_1");
        assert_eq!(config.base_url, VAPI_BASE_URL);
    }

    #[test]
    fn base_url_can_be_overridden() {
        let mut guard = TestEnvGuard::new();
        guard.set_var("VAPI_PRIVATE_KEY", "sk_test");
        guard.set_var("BACKEND_WEBHOOK_URL", "https://cb.example/");
        guard.set_var("PHONE_NUMBER_ID", "phn_1");
        guard.set_var("VAPI_BASE_URL", "https://staging.vapi.example");

        let config = DeployConfig::load().expect("config should load");
        assert_eq!(config.base_url, "https://staging.vapi.example");
    }

    #[test]
    fn missing_api_key_is_named() {
        let mut guard = TestEnvGuard::new();
        guard.remove_var("VAPI_PRIVATE_KEY");
        guard.set_var("BACKEND_WEBHOOK_URL", "https://cb.example/");
        guard.set_var("PHONE_NUMBER_ID", "phn_1");

        let error = DeployConfig::load().unwrap_err();
        match error {
            DeployError::MissingConfig { name } => assert_eq!(name, "VAPI_PRIVATE_KEY"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn missing_phone_number_is_named() {
        let mut guard = TestEnvGuard::new();
        guard.set_var("VAPI_PRIVATE_KEY", "sk_test");
        guard.set_var("BACKEND_WEBHOOK_URL", "https://cb.example/");
        guard.remove_var("PHONE_NUMBER_ID");

        let error = DeployConfig::load().unwrap_err();
        match error {
            DeployError::MissingConfig { name } => assert_eq!(name, "PHONE_NUMBER_ID"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
