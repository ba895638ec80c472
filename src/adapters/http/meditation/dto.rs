//! Request/response DTOs for the meditation endpoint.

use serde::{Deserialize, Serialize};

/// POST /meditation request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMeditationBody {
    pub topic: Option<String>,
    #[serde(default = "default_duration")]
    pub duration_minutes: u32,
}

fn default_duration() -> u32 {
    5
}

/// POST /meditation response. Audio is base64-encoded so the envelope
/// stays JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateMeditationResponse {
    pub success: bool,
    pub script: String,
    pub audio_base64: String,
    pub audio_mime_type: String,
}
