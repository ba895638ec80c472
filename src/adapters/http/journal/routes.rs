//! Axum router for the journal endpoints.

use axum::{
    routing::{delete, post},
    Router,
};

use super::super::AppState;
use super::handlers::{create_entry, delete_entry, list_entries};

/// Journal routes, mounted at `/journal`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_entry).get(list_entries))
        .route("/:id", delete(delete_entry))
}
