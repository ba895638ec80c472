//! Axum router for the meditation endpoint.

use axum::{routing::post, Router};

use super::super::AppState;
use super::handlers::generate_meditation;

/// Meditation routes, mounted at `/meditation`.
pub fn routes() -> Router<AppState> {
    Router::new().route("/", post(generate_meditation))
}
