//! HTTP handlers for the chat endpoint.

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::chat::{SendMessageCommand, SendMessageHandler};

use super::super::{ApiError, AppState, AuthenticatedUser};
use super::dto::{SendMessageBody, SendMessageResponse};

/// POST /chat/message - one companion chat turn.
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Json(body): Json<SendMessageBody>,
) -> Result<impl IntoResponse, ApiError> {
    let message = body
        .message
        .filter(|m| !m.trim().is_empty())
        .ok_or_else(|| ApiError::bad_request("Missing message"))?;

    let handler = SendMessageHandler::new(state.subscriptions.clone(), state.chat.clone());
    let result = handler
        .handle(SendMessageCommand {
            user_id: user.user_id,
            message,
            history: body.history.into_iter().map(|t| t.into_message()).collect(),
        })
        .await?;

    Ok(Json(SendMessageResponse {
        success: true,
        reply: result.reply,
    }))
}
