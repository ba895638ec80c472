//! Video avatar session handlers: quota-gated create, pass-through end.

use std::sync::Arc;

use crate::application::handlers::quota;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::MeteredFeature;
use crate::ports::{SubscriptionStore, VideoAvatarService, VideoSession};

/// Command to start an avatar video session.
#[derive(Debug, Clone)]
pub struct StartVideoSessionCommand {
    pub user_id: UserId,
}

/// Command to end a running session.
#[derive(Debug, Clone)]
pub struct EndVideoSessionCommand {
    pub user_id: UserId,
    pub session_id: String,
}

/// Handler for avatar video sessions.
pub struct VideoSessionHandler {
    store: Arc<dyn SubscriptionStore>,
    video: Arc<dyn VideoAvatarService>,
}

impl VideoSessionHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>, video: Arc<dyn VideoAvatarService>) -> Self {
        Self { store, video }
    }

    /// Starts a session, consuming one video unit.
    pub async fn start(&self, cmd: StartVideoSessionCommand) -> Result<VideoSession, DomainError> {
        let reservation = quota::reserve(
            self.store.as_ref(),
            &cmd.user_id,
            MeteredFeature::VideoSessions,
        )
        .await?;

        let session = self.video.create_session(&cmd.user_id).await?;

        quota::commit(self.store.as_ref(), &cmd.user_id, reservation).await?;

        Ok(session)
    }

    /// Ends a session. No quota involved.
    pub async fn end(&self, cmd: EndVideoSessionCommand) -> Result<(), DomainError> {
        self.video.end_session(&cmd.session_id).await?;
        tracing::debug!(user_id = %cmd.user_id, session_id = %cmd.session_id, "video session ended");
        Ok(())
    }
}
