//! StartVoiceCallHandler - quota-gated voice-agent session start.

use std::sync::Arc;

use crate::application::handlers::quota;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::MeteredFeature;
use crate::ports::{SubscriptionStore, VoiceAgent, VoiceCallSession};

/// Command to start a voice call.
#[derive(Debug, Clone)]
pub struct StartVoiceCallCommand {
    pub user_id: UserId,
}

/// Handler provisioning voice-agent web calls.
pub struct StartVoiceCallHandler {
    store: Arc<dyn SubscriptionStore>,
    voice: Arc<dyn VoiceAgent>,
}

impl StartVoiceCallHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>, voice: Arc<dyn VoiceAgent>) -> Self {
        Self { store, voice }
    }

    pub async fn handle(
        &self,
        cmd: StartVoiceCallCommand,
    ) -> Result<VoiceCallSession, DomainError> {
        let reservation =
            quota::reserve(self.store.as_ref(), &cmd.user_id, MeteredFeature::VoiceCalls).await?;

        let session = self.voice.start_web_call(&cmd.user_id).await?;

        quota::commit(self.store.as_ref(), &cmd.user_id, reservation).await?;

        Ok(session)
    }
}
