//! Journal entries: private reflections persisted per user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EntryId, Timestamp, UserId, ValidationError};

/// Maximum journal entry length in characters.
const MAX_CONTENT_CHARS: usize = 20_000;

/// One journal entry. Entries are owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub user_id: UserId,
    /// Optional mood label captured alongside the entry.
    pub mood: Option<String>,
    pub content: String,
    pub created_at: Timestamp,
}

impl JournalEntry {
    /// Creates a new entry, validating content bounds.
    pub fn new(
        user_id: UserId,
        mood: Option<String>,
        content: impl Into<String>,
        now: Timestamp,
    ) -> Result<Self, ValidationError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(ValidationError::empty_field("content"));
        }
        if content.chars().count() > MAX_CONTENT_CHARS {
            return Err(ValidationError::invalid_format(
                "content",
                format!("exceeds {} characters", MAX_CONTENT_CHARS),
            ));
        }
        Ok(Self {
            id: EntryId::new(),
            user_id,
            mood,
            content,
            created_at: now,
        })
    }
}
