//! Speech synthesis port for meditation narration.

use async_trait::async_trait;

use super::ProviderError;

/// Synthesized narration audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedAudio {
    /// Encoded audio bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes` (e.g. `audio/mpeg`).
    pub mime_type: String,
}

/// Port for the text-to-speech provider.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesizes narration audio for a script.
    async fn synthesize(&self, script: &str) -> Result<SynthesizedAudio, ProviderError>;
}
