//! External provider configuration
//!
//! API keys for the companion-session collaborators: the language model
//! behind chat and meditation scripts, the voice-agent service, the
//! conversational-video service, and the speech synthesizer.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Outbound provider timeout applied to every companion-session call.
pub const PROVIDER_CALL_TIMEOUT_SECS: u64 = 30;

/// External provider API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// Anthropic API key for chat and meditation script generation
    #[serde(default = "empty_secret")]
    pub anthropic_api_key: SecretString,

    /// Language model id
    #[serde(default = "default_model")]
    pub anthropic_model: String,

    /// Vapi API key for voice-agent web calls
    #[serde(default = "empty_secret")]
    pub vapi_api_key: SecretString,

    /// Vapi assistant id to start calls against
    pub vapi_assistant_id: Option<String>,

    /// Tavus API key for conversational-video sessions
    #[serde(default = "empty_secret")]
    pub tavus_api_key: SecretString,

    /// Tavus replica id used for avatar sessions
    pub tavus_replica_id: Option<String>,

    /// ElevenLabs API key for meditation audio synthesis
    #[serde(default = "empty_secret")]
    pub elevenlabs_api_key: SecretString,

    /// ElevenLabs voice id for meditation narration
    pub elevenlabs_voice_id: Option<String>,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

impl ProviderConfig {
    /// Validate provider configuration
    ///
    /// Only the language model key is required; the session providers are
    /// optional integrations and their routes fail with a configuration
    /// error at request time when unset.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let key = self.anthropic_api_key.expose_secret();
        if key.is_empty() {
            return Err(ValidationError::MissingRequired("ANTHROPIC_API_KEY"));
        }
        if !key.starts_with("sk-ant-") {
            return Err(ValidationError::InvalidModelApiKey);
        }
        Ok(())
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: empty_secret(),
            anthropic_model: default_model(),
            vapi_api_key: empty_secret(),
            vapi_assistant_id: None,
            tavus_api_key: empty_secret(),
            tavus_replica_id: None,
            elevenlabs_api_key: empty_secret(),
            elevenlabs_voice_id: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_model_key_rejected() {
        let config = ProviderConfig::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn wrong_model_key_prefix_rejected() {
        let config = ProviderConfig {
            anthropic_api_key: SecretString::new("sk-openai-xxx".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn session_providers_are_optional() {
        let config = ProviderConfig {
            anthropic_api_key: SecretString::new("sk-ant-xxx".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
