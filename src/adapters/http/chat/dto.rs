//! Request/response DTOs for the chat endpoint.

use serde::{Deserialize, Serialize};

use crate::ports::{ChatMessage, ChatRole};

/// POST /chat/message request.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageBody {
    pub message: Option<String>,
    /// Recent turns, oldest first.
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
}

/// One prior conversation turn.
#[derive(Debug, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

impl HistoryTurn {
    /// Converts to a port message; unknown roles become user turns.
    pub fn into_message(self) -> ChatMessage {
        let role = match self.role.as_str() {
            "assistant" => ChatRole::Assistant,
            _ => ChatRole::User,
        };
        ChatMessage {
            role,
            content: self.content,
        }
    }
}

/// POST /chat/message response.
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub success: bool,
    pub reply: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_defaults_to_empty() {
        let body: SendMessageBody = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert!(body.history.is_empty());
    }

    #[test]
    fn unknown_roles_fall_back_to_user() {
        let turn = HistoryTurn {
            role: "system".to_string(),
            content: "x".to_string(),
        };
        assert_eq!(turn.into_message().role, ChatRole::User);
    }
}
