//! Tavus client - `VideoAvatarService` implementation for
//! conversational-video sessions.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::adapters::timeout::bounded;
use crate::domain::foundation::UserId;
use crate::ports::{ProviderError, VideoAvatarService, VideoSession};

/// Configuration for the Tavus client.
#[derive(Clone)]
pub struct TavusConfig {
    api_key: SecretString,
    /// Replica (avatar) used for sessions.
    pub replica_id: Option<String>,
    /// Base URL for the API (default: https://tavusapi.com).
    pub base_url: String,
}

impl TavusConfig {
    /// Creates a new configuration.
    pub fn new(api_key: SecretString, replica_id: Option<String>) -> Self {
        Self {
            api_key,
            replica_id,
            base_url: "https://tavusapi.com".to_string(),
        }
    }

    /// Sets the base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && self.replica_id.is_some()
    }
}

/// Tavus `VideoAvatarService` implementation.
pub struct TavusVideoService {
    config: TavusConfig,
    http_client: reqwest::Client,
}

impl TavusVideoService {
    /// Creates a new client with the given configuration.
    pub fn new(config: TavusConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn request_session(&self, user_id: &UserId) -> Result<VideoSession, ProviderError> {
        let replica_id = self
            .config
            .replica_id
            .as_deref()
            .ok_or(ProviderError::NotConfigured("video avatar"))?;

        let body = CreateConversationBody {
            replica_id: replica_id.to_string(),
            conversation_name: format!("companion-{}", user_id),
        };

        let response = self
            .http_client
            .post(format!("{}/v2/conversations", self.config.base_url))
            .header("x-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "Tavus session creation failed");
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let conversation: ConversationResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        Ok(VideoSession {
            session_id: conversation.conversation_id,
            join_url: conversation.conversation_url,
        })
    }

    async fn request_end(&self, session_id: &str) -> Result<(), ProviderError> {
        let response = self
            .http_client
            .post(format!(
                "{}/v2/conversations/{}/end",
                self.config.base_url, session_id
            ))
            .header("x-api-key", self.config.api_key.expose_secret())
            .send()
            .await
            .map_err(|e| ProviderError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "Tavus session end failed");
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl VideoAvatarService for TavusVideoService {
    async fn create_session(&self, user_id: &UserId) -> Result<VideoSession, ProviderError> {
        if !self.config.is_configured() {
            return Err(ProviderError::NotConfigured("video avatar"));
        }
        bounded("tavus", self.request_session(user_id)).await
    }

    async fn end_session(&self, session_id: &str) -> Result<(), ProviderError> {
        if !self.config.is_configured() {
            return Err(ProviderError::NotConfigured("video avatar"));
        }
        bounded("tavus", self.request_end(session_id)).await
    }
}

#[derive(Serialize)]
struct CreateConversationBody {
    replica_id: String,
    conversation_name: String,
}

#[derive(Deserialize)]
struct ConversationResponse {
    conversation_id: String,
    conversation_url: String,
}
