//! Vapi client - `VoiceAgent` implementation for voice-agent web calls.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::adapters::timeout::bounded;
use crate::domain::foundation::UserId;
use crate::ports::{ProviderError, VoiceAgent, VoiceCallSession};

/// Configuration for the Vapi client.
#[derive(Clone)]
pub struct VapiConfig {
    api_key: SecretString,
    /// Assistant to start calls against.
    pub assistant_id: Option<String>,
    /// Base URL for the API (default: https://api.vapi.ai).
    pub base_url: String,
}

impl VapiConfig {
    /// Creates a new configuration.
    pub fn new(api_key: SecretString, assistant_id: Option<String>) -> Self {
        Self {
            api_key,
            assistant_id,
            base_url: "https://api.vapi.ai".to_string(),
        }
    }

    /// Sets the base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && self.assistant_id.is_some()
    }
}

/// Vapi `VoiceAgent` implementation.
pub struct VapiVoiceAgent {
    config: VapiConfig,
    http_client: reqwest::Client,
}

impl VapiVoiceAgent {
    /// Creates a new client with the given configuration.
    pub fn new(config: VapiConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn request_call(&self, user_id: &UserId) -> Result<VoiceCallSession, ProviderError> {
        let assistant_id = self
            .config
            .assistant_id
            .as_deref()
            .ok_or(ProviderError::NotConfigured("voice agent"))?;

        let body = CreateCallBody {
            assistant_id: assistant_id.to_string(),
            metadata: CallMetadata {
                user_id: user_id.to_string(),
            },
        };

        let response = self
            .http_client
            .post(format!("{}/call/web", self.config.base_url))
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "Vapi call creation failed");
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let call: CallResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        Ok(VoiceCallSession {
            call_id: call.id,
            join_url: call.web_call_url,
        })
    }
}

#[async_trait]
impl VoiceAgent for VapiVoiceAgent {
    async fn start_web_call(&self, user_id: &UserId) -> Result<VoiceCallSession, ProviderError> {
        if !self.config.is_configured() {
            return Err(ProviderError::NotConfigured("voice agent"));
        }
        bounded("vapi", self.request_call(user_id)).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateCallBody {
    assistant_id: String,
    metadata: CallMetadata,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CallMetadata {
    user_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallResponse {
    id: String,
    web_call_url: String,
}
