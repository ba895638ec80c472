//! Axum router for the chat endpoint.

use axum::{routing::post, Router};

use super::super::AppState;
use super::handlers::send_message;

/// Chat routes, mounted at `/chat`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/message", post(send_message))
}
