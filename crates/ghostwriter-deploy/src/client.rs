//! HTTP client for the Vapi assistant-management API.
//!
//! Thin request/response mapping only: no business logic, no idempotency,
//! no retries. Every non-success status becomes a typed [`DeployError::Api`]
//! carrying the status code. Idempotency lives in the reconciler.

use std::{future::Future, pin::Pin};

use serde::Deserialize;
use tracing::debug;

use crate::{
    assistant::AssistantConfig,
    error::{DeployError, Result},
};

/// Default base URL of the Vapi REST API.
pub const VAPI_BASE_URL: &str = "https://api.vapi.ai";

/// A remote assistant resource as returned by the API.
///
/// Only the fields this system consumes; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Assistant {
    /// Identifier assigned by the remote system.
    pub id: String,
    /// Display name; the reconciler's sole lookup key.
    #[serde(default)]
    pub name: String,
}

/// A phone number's association with an assistant.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhoneNumberLink {
    /// Phone number identifier.
    pub id: String,
    /// Assistant the number now routes to.
    #[serde(rename = "assistantId", default)]
    pub assistant_id: Option<String>,
}

/// Capability interface over the remote assistant API.
///
/// Four operations: list, create, update, link. Any implementation, real or
/// test double, satisfies the same interface; the reconciler never needs
/// more.
pub trait AssistantApi: Send + Sync {
    /// Lists all assistants visible to the credential.
    fn list_assistants(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Assistant>>> + Send + '_>>;

    /// Creates a new assistant from the desired configuration.
    fn create_assistant(
        &self,
        config: AssistantConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Assistant>> + Send + '_>>;

    /// Overwrites an existing assistant with the desired configuration.
    fn update_assistant(
        &self,
        assistant_id: String,
        config: AssistantConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Assistant>> + Send + '_>>;

    /// Points a phone number at an assistant, replacing any prior link.
    fn link_phone_number(
        &self,
        phone_number_id: String,
        assistant_id: String,
    ) -> Pin<Box<dyn Future<Output = Result<PhoneNumberLink>> + Send + '_>>;
}

/// Production client for the Vapi REST API.
#[derive(Debug, Clone)]
pub struct VapiClient {
    http: reqwest::Client,
    base_url: String,
}

impl VapiClient {
    /// Creates a client with bearer authentication against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns `DeployError::Configuration` if the API key cannot form a
    /// valid header or the HTTP client cannot be built.
    pub fn new(api_key: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();

        let mut auth = reqwest::header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| DeployError::configuration(format!("invalid API key: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| DeployError::configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url: base_url.into().trim_end_matches('/').to_string() })
    }

    /// Reads a response, mapping non-success statuses to typed API errors.
    async fn read_json(response: reqwest::Response, operation: &str) -> Result<serde_json::Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DeployError::api(status.as_u16(), format!("{operation} failed: {body}")));
        }

        response
            .json()
            .await
            .map_err(|e| DeployError::invalid_response(format!("{operation}: {e}")))
    }
}

impl AssistantApi for VapiClient {
    fn list_assistants(&self) -> Pin<Box<dyn Future<Output = Result<Vec<Assistant>>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}/assistant", self.base_url);
            debug!(url = %url, "Listing assistants");

            let response = self
                .http
                .get(&url)
                .send()
                .await
                .map_err(|e| DeployError::network(e.to_string()))?;

            let value = Self::read_json(response, "list assistants").await?;

            // A non-array body is tolerated as "no assistants".
            match value {
                serde_json::Value::Array(_) => serde_json::from_value(value)
                    .map_err(|e| DeployError::invalid_response(format!("list assistants: {e}"))),
                _ => Ok(Vec::new()),
            }
        })
    }

    fn create_assistant(
        &self,
        config: AssistantConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Assistant>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}/assistant", self.base_url);
            debug!(url = %url, name = %config.name, "Creating assistant");

            let response = self
                .http
                .post(&url)
                .json(&config)
                .send()
                .await
                .map_err(|e| DeployError::network(e.to_string()))?;

            let value = Self::read_json(response, "create assistant").await?;
            serde_json::from_value(value)
                .map_err(|e| DeployError::invalid_response(format!("create assistant: {e}")))
        })
    }

    fn update_assistant(
        &self,
        assistant_id: String,
        config: AssistantConfig,
    ) -> Pin<Box<dyn Future<Output = Result<Assistant>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}/assistant/{assistant_id}", self.base_url);
            debug!(url = %url, "Updating assistant");

            let response = self
                .http
                .patch(&url)
                .json(&config)
                .send()
                .await
                .map_err(|e| DeployError::network(e.to_string()))?;

            let value = Self::read_json(response, "update assistant").await?;
            serde_json::from_value(value)
                .map_err(|e| DeployError::invalid_response(format!("update assistant: {e}")))
        })
    }

    fn link_phone_number(
        &self,
        phone_number_id: String,
        assistant_id: String,
    ) -> Pin<Box<dyn Future<Output = Result<PhoneNumberLink>> + Send + '_>> {
        Box::pin(async move {
            let url = format!("{}/phone-number/{phone_number_id}", self.base_url);
            debug!(url = %url, assistant_id = %assistant_id, "Linking phone number");

            let response = self
                .http
                .patch(&url)
                .json(&serde_json::json!({ "assistantId": assistant_id }))
                .send()
                .await
                .map_err(|e| DeployError::network(e.to_string()))?;

            let value = Self::read_json(response, "link phone number").await?;
            serde_json::from_value(value)
                .map_err(|e| DeployError::invalid_response(format!("link phone number: {e}")))
        })
    }
}

pub mod mock {
    //! Mock assistant API for testing.
    //!
    //! Records every invocation so tests can assert exact call sequences,
    //! including the hard dry-run invariant of zero calls. Supports seeded
    //! assistants and per-operation failure injection.

    use std::{future::Future, pin::Pin, sync::Arc};

    use tokio::sync::RwLock;

    use super::{Assistant, AssistantApi, PhoneNumberLink};
    use crate::{
        assistant::AssistantConfig,
        error::{DeployError, Result},
    };

    /// One recorded API invocation.
    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedCall {
        /// `list_assistants` was invoked.
        List,
        /// `create_assistant` was invoked with this configuration.
        Create {
            /// The desired configuration passed in.
            config: AssistantConfig,
        },
        /// `update_assistant` was invoked.
        Update {
            /// Target assistant id.
            assistant_id: String,
            /// The desired configuration passed in.
            config: AssistantConfig,
        },
        /// `link_phone_number` was invoked.
        Link {
            /// Phone number being linked.
            phone_number_id: String,
            /// Assistant the number was pointed at.
            assistant_id: String,
        },
    }

    /// In-memory assistant API recording all calls.
    #[derive(Debug, Clone, Default)]
    pub struct MockAssistantApi {
        assistants: Arc<RwLock<Vec<Assistant>>>,
        calls: Arc<RwLock<Vec<RecordedCall>>>,
        fail_list: Arc<RwLock<Option<DeployError>>>,
        fail_create: Arc<RwLock<Option<DeployError>>>,
        fail_update: Arc<RwLock<Option<DeployError>>>,
        fail_link: Arc<RwLock<Option<DeployError>>>,
    }

    impl MockAssistantApi {
        /// Creates an empty mock with no assistants.
        pub fn new() -> Self {
            Self::default()
        }

        /// Seeds an existing remote assistant.
        pub async fn seed_assistant(&self, id: impl Into<String>, name: impl Into<String>) {
            self.assistants
                .write()
                .await
                .push(Assistant { id: id.into(), name: name.into() });
        }

        /// Makes `list_assistants` fail with `error`.
        pub async fn fail_list(&self, error: DeployError) {
            *self.fail_list.write().await = Some(error);
        }

        /// Makes `create_assistant` fail with `error`.
        pub async fn fail_create(&self, error: DeployError) {
            *self.fail_create.write().await = Some(error);
        }

        /// Makes `update_assistant` fail with `error`.
        pub async fn fail_update(&self, error: DeployError) {
            *self.fail_update.write().await = Some(error);
        }

        /// Makes `link_phone_number` fail with `error`.
        pub async fn fail_link(&self, error: DeployError) {
            *self.fail_link.write().await = Some(error);
        }

        /// Returns all recorded invocations in order.
        pub async fn recorded_calls(&self) -> Vec<RecordedCall> {
            self.calls.read().await.clone()
        }

        /// Returns how many invocations were recorded.
        pub async fn call_count(&self) -> usize {
            self.calls.read().await.len()
        }

        fn next_created_id(count: usize) -> String {
            format!("asst_{}", count + 1)
        }
    }

    impl AssistantApi for MockAssistantApi {
        fn list_assistants(
            &self,
        ) -> Pin<Box<dyn Future<Output = Result<Vec<Assistant>>> + Send + '_>> {
            let assistants = self.assistants.clone();
            let calls = self.calls.clone();
            let fail = self.fail_list.clone();

            Box::pin(async move {
                calls.write().await.push(RecordedCall::List);
                if let Some(error) = fail.read().await.clone() {
                    return Err(error);
                }
                Ok(assistants.read().await.clone())
            })
        }

        fn create_assistant(
            &self,
            config: AssistantConfig,
        ) -> Pin<Box<dyn Future<Output = Result<Assistant>> + Send + '_>> {
            let assistants = self.assistants.clone();
            let calls = self.calls.clone();
            let fail = self.fail_create.clone();

            Box::pin(async move {
                calls.write().await.push(RecordedCall::Create { config: config.clone() });
                if let Some(error) = fail.read().await.clone() {
                    return Err(error);
                }

                let mut assistants = assistants.write().await;
                let created = Assistant {
                    id: Self::next_created_id(assistants.len()),
                    name: config.name,
                };
                assistants.push(created.clone());
                Ok(created)
            })
        }

        fn update_assistant(
            &self,
            assistant_id: String,
            config: AssistantConfig,
        ) -> Pin<Box<dyn Future<Output = Result<Assistant>> + Send + '_>> {
            let calls = self.calls.clone();
            let fail = self.fail_update.clone();

            Box::pin(async move {
                calls.write().await.push(RecordedCall::Update {
                    assistant_id: assistant_id.clone(),
                    config: config.clone(),
                });
                if let Some(error) = fail.read().await.clone() {
                    return Err(error);
                }
                Ok(Assistant { id: assistant_id, name: config.name })
            })
        }

        fn link_phone_number(
            &self,
            phone_number_id: String,
            assistant_id: String,
        ) -> Pin<Box<dyn Future<Output = Result<PhoneNumberLink>> + Send + '_>> {
            let calls = self.calls.clone();
            let fail = self.fail_link.clone();

            Box::pin(async move {
                calls.write().await.push(RecordedCall::Link {
                    phone_number_id: phone_number_id.clone(),
                    assistant_id: assistant_id.clone(),
                });
                if let Some(error) = fail.read().await.clone() {
                    return Err(error);
                }
                Ok(PhoneNumberLink { id: phone_number_id, assistant_id: Some(assistant_id) })
            })
        }
    }
}
