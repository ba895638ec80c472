//! ElevenLabs client - `SpeechSynthesizer` implementation for
//! meditation narration audio.

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::adapters::timeout::bounded;
use crate::ports::{ProviderError, SpeechSynthesizer, SynthesizedAudio};

/// Configuration for the ElevenLabs client.
#[derive(Clone)]
pub struct ElevenLabsConfig {
    api_key: SecretString,
    /// Narration voice.
    pub voice_id: Option<String>,
    /// Base URL for the API (default: https://api.elevenlabs.io).
    pub base_url: String,
}

impl ElevenLabsConfig {
    /// Creates a new configuration.
    pub fn new(api_key: SecretString, voice_id: Option<String>) -> Self {
        Self {
            api_key,
            voice_id,
            base_url: "https://api.elevenlabs.io".to_string(),
        }
    }

    /// Sets the base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn is_configured(&self) -> bool {
        !self.api_key.expose_secret().is_empty() && self.voice_id.is_some()
    }
}

/// ElevenLabs `SpeechSynthesizer` implementation.
pub struct ElevenLabsSynthesizer {
    config: ElevenLabsConfig,
    http_client: reqwest::Client,
}

impl ElevenLabsSynthesizer {
    /// Creates a new client with the given configuration.
    pub fn new(config: ElevenLabsConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn request_audio(&self, script: &str) -> Result<SynthesizedAudio, ProviderError> {
        let voice_id = self
            .config
            .voice_id
            .as_deref()
            .ok_or(ProviderError::NotConfigured("speech synthesis"))?;

        let body = SynthesisBody {
            text: script.to_string(),
            model_id: "eleven_multilingual_v2",
        };

        let response = self
            .http_client
            .post(format!(
                "{}/v1/text-to-speech/{}",
                self.config.base_url, voice_id
            ))
            .header("xi-api-key", self.config.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), %body, "ElevenLabs synthesis failed");
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ProviderError::invalid_response(e.to_string()))?;

        Ok(SynthesizedAudio {
            bytes: bytes.to_vec(),
            mime_type: "audio/mpeg".to_string(),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSynthesizer {
    async fn synthesize(&self, script: &str) -> Result<SynthesizedAudio, ProviderError> {
        if !self.config.is_configured() {
            return Err(ProviderError::NotConfigured("speech synthesis"));
        }
        bounded("elevenlabs", self.request_audio(script)).await
    }
}

#[derive(Serialize)]
struct SynthesisBody {
    text: String,
    model_id: &'static str,
}
