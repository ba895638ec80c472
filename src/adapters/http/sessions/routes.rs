//! Axum router for the session endpoints.

use axum::{routing::post, Router};

use super::super::AppState;
use super::handlers::{end_video_session, start_video_session, start_voice_call};

/// Session routes, mounted at `/sessions`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/voice", post(start_voice_call))
        .route("/video", post(start_video_session))
        .route("/video/end", post(end_video_session))
}
