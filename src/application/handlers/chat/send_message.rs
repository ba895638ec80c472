//! SendMessageHandler - quota-gated proxy to the language model.

use std::sync::Arc;

use crate::application::handlers::quota;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::subscription::MeteredFeature;
use crate::ports::{ChatMessage, ChatProvider, SubscriptionStore};

/// System prompt for the companion conversation.
const COMPANION_SYSTEM_PROMPT: &str = "You are a warm, supportive mental wellness companion. \
     Listen actively, validate feelings, and offer gentle, practical suggestions. \
     You are not a therapist and you encourage professional help for serious concerns.";

/// Command to send one chat message.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    pub user_id: UserId,
    pub message: String,
    /// Recent conversation turns, oldest first.
    pub history: Vec<ChatMessage>,
}

/// Result of a chat turn.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    pub reply: String,
}

/// Handler forwarding chat turns to the language model.
pub struct SendMessageHandler {
    store: Arc<dyn SubscriptionStore>,
    chat: Arc<dyn ChatProvider>,
}

impl SendMessageHandler {
    pub fn new(store: Arc<dyn SubscriptionStore>, chat: Arc<dyn ChatProvider>) -> Self {
        Self { store, chat }
    }

    pub async fn handle(&self, cmd: SendMessageCommand) -> Result<SendMessageResult, DomainError> {
        let reservation =
            quota::reserve(self.store.as_ref(), &cmd.user_id, MeteredFeature::ChatMessages)
                .await?;

        let mut messages = cmd.history;
        messages.push(ChatMessage::user(cmd.message));

        let reply = self
            .chat
            .reply(COMPANION_SYSTEM_PROMPT, &messages)
            .await?;

        quota::commit(self.store.as_ref(), &cmd.user_id, reservation).await?;

        Ok(SendMessageResult { reply })
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

    struct FakeChat {
        fail: bool,
    }

    #[async_trait]
    impl ChatProvider for FakeChat {
        async fn reply(
            &self,
            _system_prompt: &str,
            messages: &[ChatMessage],
        ) -> Result<String, ProviderError> {
            if self.fail {
                return Err(ProviderError::network("down"));
            }
            Ok(format!("echo: {}", messages.last().unwrap().content))
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
    async fn reply_consumes_one_chat_unit() {
        let store = seeded_store().await;
        let handler = SendMessageHandler::new(store.clone(), Arc::new(FakeChat { fail: false }));

        let result = handler
            .handle(SendMessageCommand {
                user_id: user(),
                message: "feeling anxious".to_string(),
                history: vec![],
            })
            .await
            .unwrap();

        assert_eq!(result.reply, "echo: feeling anxious");
        let record = store.get(&user()).await.unwrap().unwrap();
        assert_eq!(record.usage.chat_messages, 1);
    }

    #[tokio::test]
    async fn provider_failure_burns_no_quota() {
        let store = seeded_store().await;
        let handler = SendMessageHandler::new(store.clone(), Arc::new(FakeChat { fail: true }));

        let err = handler
            .handle(SendMessageCommand {
                user_id: user(),
                message: "hello".to_string(),
                history: vec![],
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ProviderError);
        let record = store.get(&user()).await.unwrap().unwrap();
        assert_eq!(record.usage.chat_messages, 0);
    }

    #[tokio::test]
    async fn exhausted_quota_blocks_the_provider_call() {
        let store = Arc::new(InMemorySubscriptionStore::new());
        let mut record = SubscriptionRecord::free_default(Timestamp::now());
        record.limits.chat_messages = 0;
        store.seed(&user(), record).await;

        let handler = SendMessageHandler::new(store, Arc::new(FakeChat { fail: false }));

        let err = handler
            .handle(SendMessageCommand {
                user_id: user(),
                message: "hello".to_string(),
                history: vec![],
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::QuotaExceeded);
    }
}
