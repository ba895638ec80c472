//! HTTP handlers for the journal endpoints.

use axum::extract::{Json, Path, State};
use axum::response::IntoResponse;

use crate::application::handlers::journal::{
    CreateEntryCommand, DeleteEntryCommand, JournalHandler,
};
use crate::domain::foundation::EntryId;

use super::super::{ApiError, AppState, AuthenticatedUser};
use super::dto::{
    CreateEntryBody, CreateEntryResponse, DeleteEntryResponse, EntryView, ListEntriesResponse,
};

/// POST /journal - create an entry.
pub async fn create_entry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<CreateEntryBody>,
) -> Result<impl IntoResponse, ApiError> {
    let content = body
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing content"))?;

    let handler = JournalHandler::new(state.journal.clone());
    let entry = handler
        .create(CreateEntryCommand {
            user_id: user.user_id,
            mood: body.mood,
            content,
        })
        .await?;

    Ok(Json(CreateEntryResponse {
        success: true,
        entry: EntryView::from(entry),
    }))
}

/// GET /journal - list the caller's entries.
pub async fn list_entries(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = JournalHandler::new(state.journal.clone());
    let entries = handler.list(&user.user_id).await?;

    Ok(Json(ListEntriesResponse {
        success: true,
        entries: entries.into_iter().map(EntryView::from).collect(),
    }))
}

/// DELETE /journal/{id} - delete one of the caller's entries.
pub async fn delete_entry(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let entry_id: EntryId = id
        .parse()
        .map_err(|_| ApiError::bad_request("Invalid entry id"))?;

    let handler = JournalHandler::new(state.journal.clone());
    handler
        .delete(DeleteEntryCommand {
            user_id: user.user_id,
            entry_id,
        })
        .await?;

    Ok(Json(DeleteEntryResponse { success: true }))
}
