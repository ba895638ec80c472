//! Request/response DTOs for the journal endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::journal::JournalEntry;

/// POST /journal request.
#[derive(Debug, Deserialize)]
pub struct CreateEntryBody {
    pub content: Option<String>,
    pub mood: Option<String>,
}

/// Journal entry shape returned to clients.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub id: String,
    pub mood: Option<String>,
    pub content: String,
    pub created_at: String,
}

impl From<JournalEntry> for EntryView {
    fn from(entry: JournalEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            mood: entry.mood,
            content: entry.content,
            created_at: entry.created_at.to_string(),
        }
    }
}

/// POST /journal response.
#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub success: bool,
    pub entry: EntryView,
}

/// GET /journal response.
#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub success: bool,
    pub entries: Vec<EntryView>,
}

/// DELETE /journal/{id} response.
#[derive(Debug, Serialize)]
pub struct DeleteEntryResponse {
    pub success: bool,
}
