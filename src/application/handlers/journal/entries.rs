//! Journal entry handlers: create, list, delete.
//!
//! Plain CRUD on the document store; no external provider, no quota.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, EntryId, ErrorCode, Timestamp, UserId};
use crate::domain::journal::JournalEntry;
use crate::ports::JournalStore;

/// Command to create a journal entry.
#[derive(Debug, Clone)]
pub struct CreateEntryCommand {
    pub user_id: UserId,
    pub mood: Option<String>,
    pub content: String,
}

/// Command to delete a journal entry.
#[derive(Debug, Clone)]
pub struct DeleteEntryCommand {
    pub user_id: UserId,
    pub entry_id: EntryId,
}

/// Handler for journal CRUD.
pub struct JournalHandler {
    store: Arc<dyn JournalStore>,
}

impl JournalHandler {
    pub fn new(store: Arc<dyn JournalStore>) -> Self {
        Self { store }
    }

    pub async fn create(&self, cmd: CreateEntryCommand) -> Result<JournalEntry, DomainError> {
        let entry = JournalEntry::new(cmd.user_id, cmd.mood, cmd.content, Timestamp::now())?;
        self.store.insert(&entry).await?;
        Ok(entry)
    }

    pub async fn list(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, DomainError> {
        self.store.list_for_user(user_id).await
    }

    pub async fn delete(&self, cmd: DeleteEntryCommand) -> Result<(), DomainError> {
        let deleted = self.store.delete(&cmd.user_id, &cmd.entry_id).await?;
        if !deleted {
            return Err(DomainError::new(
                ErrorCode::EntryNotFound,
                format!("No entry {} for this user", cmd.entry_id),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryJournalStore;

    fn user() -> UserId {
        UserId::new("user_42").unwrap()
    }

    fn handler() -> (JournalHandler, Arc<InMemoryJournalStore>) {
        let store = Arc::new(InMemoryJournalStore::new());
        (JournalHandler::new(store.clone()), store)
    }

    #[tokio::test]
    async fn create_then_list_returns_the_entry() {
        let (handler, _) = handler();

        let entry = handler
            .create(CreateEntryCommand {
                user_id: user(),
                mood: Some("hopeful".to_string()),
                content: "good day today".to_string(),
            })
            .await
            .unwrap();

        let listed = handler.list(&user()).await.unwrap();
        assert_eq!(listed, vec![entry]);
    }

    #[tokio::test]
    async fn empty_content_is_a_validation_failure() {
        let (handler, _) = handler();

        let err = handler
            .create(CreateEntryCommand {
                user_id: user(),
                mood: None,
                content: "".to_string(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn deleting_a_missing_entry_is_not_found() {
        let (handler, _) = handler();

        let err = handler
            .delete(DeleteEntryCommand {
                user_id: user(),
                entry_id: EntryId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::EntryNotFound);
    }

    #[tokio::test]
    async fn delete_removes_only_the_owned_entry() {
        let (handler, _) = handler();

        let entry = handler
            .create(CreateEntryCommand {
                user_id: user(),
                mood: None,
                content: "note".to_string(),
            })
            .await
            .unwrap();

        handler
            .delete(DeleteEntryCommand {
                user_id: user(),
                entry_id: entry.id,
            })
            .await
            .unwrap();

        assert!(handler.list(&user()).await.unwrap().is_empty());
    }
}
