//! GenerateMeditationHandler - guided meditation script + narration.
//!
//! Two provider hops: the language model writes a short script for the
//! requested topic, then the speech synthesizer narrates it. Counts as
//! one chat-message unit (the model call is the metered part).

use std::sync::Arc;

use crate::application::handlers::quota;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::MeteredFeature;
use crate::ports::{ChatMessage, ChatProvider, SpeechSynthesizer, SubscriptionStore, SynthesizedAudio};

/// System prompt for meditation script generation.
const SCRIPT_SYSTEM_PROMPT: &str = "You write guided meditation scripts. Produce a calm, slow-paced \
     script for the requested topic and duration. Plain prose only, no \
     headings or stage directions.";

/// Command to generate a guided meditation.
#[derive(Debug, Clone)]
pub struct GenerateMeditationCommand {
    pub user_id: UserId,
    /// What the meditation should focus on (e.g. "sleep", "anxiety").
    pub topic: String,
    /// Target length in minutes.
    pub duration_minutes: u32,
}

/// A generated meditation.
#[derive(Debug, Clone)]
pub struct GeneratedMeditation {
    pub script: String,
    pub audio: SynthesizedAudio,
}

/// Handler producing meditation audio.
pub struct GenerateMeditationHandler {
    store: Arc<dyn SubscriptionStore>,
    chat: Arc<dyn ChatProvider>,
    speech: Arc<dyn SpeechSynthesizer>,
}

impl GenerateMeditationHandler {
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        chat: Arc<dyn ChatProvider>,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self { store, chat, speech }
    }

    pub async fn handle(
        &self,
        cmd: GenerateMeditationCommand,
    ) -> Result<GeneratedMeditation, DomainError> {
        if cmd.topic.trim().is_empty() {
            return Err(DomainError::new(
                crate::domain::foundation::ErrorCode::ValidationFailed,
                "topic must not be empty",
            ));
        }

        let reservation =
            quota::reserve(self.store.as_ref(), &cmd.user_id, MeteredFeature::ChatMessages)
                .await?;

        let prompt = format!(
            "Write a {}-minute guided meditation about {}.",
            cmd.duration_minutes.clamp(1, 30),
            cmd.topic.trim()
        );
        let script = self
            .chat
            .reply(SCRIPT_SYSTEM_PROMPT, &[ChatMessage::user(prompt)])
            .await?;

        let audio = self.speech.synthesize(&script).await?;

        quota::commit(self.store.as_ref(), &cmd.user_id, reservation).await?;

        Ok(GeneratedMeditation { script, audio })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemorySubscriptionStore;
    use crate::domain::foundation::{ErrorCode, Timestamp};
    use crate::domain::subscription::SubscriptionRecord;
    use crate::ports::ProviderError;
    use async_trait::async_trait;

    struct FakeChat;

    #[async_trait]
    impl ChatProvider for FakeChat {
        async fn reply(
            &self,
            _system_prompt: &str,
            _messages: &[ChatMessage],
        ) -> Result<String, ProviderError> {
            Ok("Close your eyes and breathe.".to_string())
        }
    }

    struct FakeSpeech {
        fail: bool,
    }

    #[async_trait]
    impl SpeechSynthesizer for FakeSpeech {
        async fn synthesize(&self, _script: &str) -> Result<SynthesizedAudio, ProviderError> {
            if self.fail {
                return Err(ProviderError::Timeout { timeout_secs: 30 });
            }
            Ok(SynthesizedAudio {
                bytes: vec![0u8; 16],
                mime_type: "audio/mpeg".to_string(),
            })
        }
    }

    fn user() -> UserId {
        UserId::new("user_42").unwrap()
    }

    async fn seeded_store() -> Arc<InMemorySubscriptionStore> {
        let store = Arc::new(InMemorySubscriptionStore::new());
        store
            .seed(&user(), SubscriptionRecord::free_default(Timestamp::now()))
            .await;
        store
    }

    #[tokio::test]
    async fn generates_script_and_audio() {
        let store = seeded_store().await;
        let handler = GenerateMeditationHandler::new(
            store.clone(),
            Arc::new(FakeChat),
            Arc::new(FakeSpeech { fail: false }),
        );

        let meditation = handler
            .handle(GenerateMeditationCommand {
                user_id: user(),
                topic: "sleep".to_string(),
                duration_minutes: 5,
            })
            .await
            .unwrap();

        assert!(meditation.script.contains("breathe"));
        assert_eq!(meditation.audio.mime_type, "audio/mpeg");

        let record = store.get(&user()).await.unwrap().unwrap();
        assert_eq!(record.usage.chat_messages, 1);
    }

    #[tokio::test]
    async fn empty_topic_is_rejected() {
        let store = seeded_store().await;
        let handler = GenerateMeditationHandler::new(
            store,
            Arc::new(FakeChat),
            Arc::new(FakeSpeech { fail: false }),
        );

        let err = handler
            .handle(GenerateMeditationCommand {
                user_id: user(),
                topic: "  ".to_string(),
                duration_minutes: 5,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn synthesis_timeout_burns_no_quota() {
        let store = seeded_store().await;
        let handler = GenerateMeditationHandler::new(
            store.clone(),
            Arc::new(FakeChat),
            Arc::new(FakeSpeech { fail: true }),
        );

        let err = handler
            .handle(GenerateMeditationCommand {
                user_id: user(),
                topic: "sleep".to_string(),
                duration_minutes: 5,
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ProviderTimeout);
        let record = store.get(&user()).await.unwrap().unwrap();
        assert_eq!(record.usage.chat_messages, 0);
    }
}
