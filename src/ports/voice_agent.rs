//! Voice-agent service port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::ProviderError;

/// A provisioned web-call session with the voice agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCallSession {
    /// Provider call id.
    pub call_id: String,
    /// URL the client joins to start talking.
    pub join_url: String,
}

/// Port for the telephony/voice-agent service.
#[async_trait]
pub trait VoiceAgent: Send + Sync {
    /// Starts a web call for a user and returns the join details.
    async fn start_web_call(&self, user_id: &UserId) -> Result<VoiceCallSession, ProviderError>;
}
