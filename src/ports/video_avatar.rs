//! Conversational-video service port.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::ProviderError;

/// A provisioned avatar video session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSession {
    /// Provider conversation id.
    pub session_id: String,
    /// URL the client joins for the video session.
    pub join_url: String,
}

/// Port for the conversational-video (avatar) service.
#[async_trait]
pub trait VideoAvatarService: Send + Sync {
    /// Creates an avatar session for a user.
    async fn create_session(&self, user_id: &UserId) -> Result<VideoSession, ProviderError>;

    /// Ends a running avatar session.
    async fn end_session(&self, session_id: &str) -> Result<(), ProviderError>;
}
