//! Request/response DTOs for the session endpoints.

use serde::{Deserialize, Serialize};

/// POST /sessions/voice response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceCallResponse {
    pub success: bool,
    pub call_id: String,
    pub join_url: String,
}

/// POST /sessions/video response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSessionResponse {
    pub success: bool,
    pub session_id: String,
    pub join_url: String,
}

/// POST /sessions/video/end request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndVideoSessionBody {
    pub session_id: Option<String>,
}

/// POST /sessions/video/end response.
#[derive(Debug, Serialize)]
pub struct EndVideoSessionResponse {
    pub success: bool,
}
