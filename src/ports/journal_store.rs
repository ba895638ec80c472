//! Journal entry store port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EntryId, UserId};
use crate::domain::journal::JournalEntry;

/// Port for journal entry persistence.
#[async_trait]
pub trait JournalStore: Send + Sync {
    /// Inserts a new entry.
    async fn insert(&self, entry: &JournalEntry) -> Result<(), DomainError>;

    /// Lists a user's entries, newest first.
    async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<JournalEntry>, DomainError>;

    /// Deletes an entry owned by the user. Returns false if no such
    /// entry exists for that owner.
    async fn delete(&self, user_id: &UserId, entry_id: &EntryId) -> Result<bool, DomainError>;
}
