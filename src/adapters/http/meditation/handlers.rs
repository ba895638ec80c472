//! HTTP handlers for the meditation endpoint.

use axum::extract::{Json, State};
use axum::response::IntoResponse;
use base64::Engine;

use crate::application::handlers::meditation::{
    GenerateMeditationCommand, GenerateMeditationHandler,
};

use super::super::{ApiError, AppState, AuthenticatedUser};
use super::dto::{GenerateMeditationBody, GenerateMeditationResponse};

/// POST /meditation - generate a guided meditation with narration.
pub async fn generate_meditation(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<GenerateMeditationBody>,
) -> Result<impl IntoResponse, ApiError> {
    let topic = body
        .topic
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing topic"))?;

    let handler = GenerateMeditationHandler::new(
        state.subscriptions.clone(),
        state.chat.clone(),
        state.speech.clone(),
    );
    let meditation = handler
        .handle(GenerateMeditationCommand {
            user_id: user.user_id,
            topic,
            duration_minutes: body.duration_minutes,
        })
        .await?;

    Ok(Json(GenerateMeditationResponse {
        success: true,
        script: meditation.script,
        audio_base64: base64::engine::general_purpose::STANDARD.encode(&meditation.audio.bytes),
        audio_mime_type: meditation.audio.mime_type,
    }))
}
