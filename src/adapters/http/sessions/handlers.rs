//! HTTP handlers for voice and video session endpoints.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::sessions::{
    EndVideoSessionCommand, StartVideoSessionCommand, StartVoiceCallCommand,
    StartVoiceCallHandler, VideoSessionHandler,
};

use super::super::{ApiError, AppState, AuthenticatedUser};
use super::dto::{
    EndVideoSessionBody, EndVideoSessionResponse, VideoSessionResponse, VoiceCallResponse,
};

/// POST /sessions/voice - start a voice-agent web call.
pub async fn start_voice_call(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = StartVoiceCallHandler::new(state.subscriptions.clone(), state.voice.clone());
    let session = handler
        .handle(StartVoiceCallCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(VoiceCallResponse {
        success: true,
        call_id: session.call_id,
        join_url: session.join_url,
    }))
}

/// POST /sessions/video - start an avatar video session.
pub async fn start_video_session(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = VideoSessionHandler::new(state.subscriptions.clone(), state.video.clone());
    let session = handler
        .start(StartVideoSessionCommand {
            user_id: user.user_id,
        })
        .await?;

    Ok(Json(VideoSessionResponse {
        success: true,
        session_id: session.session_id,
        join_url: session.join_url,
    }))
}

/// POST /sessions/video/end - end a running avatar session.
pub async fn end_video_session(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<EndVideoSessionBody>,
) -> Result<impl IntoResponse, ApiError> {
    let session_id = body
        .session_id
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing sessionId"))?;

    let handler = VideoSessionHandler::new(state.subscriptions.clone(), state.video.clone());
    handler
        .end(EndVideoSessionCommand {
            user_id: user.user_id,
            session_id,
        })
        .await?;

    Ok(Json(EndVideoSessionResponse { success: true }))
}
