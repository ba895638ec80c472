//! ElevenLabs adapter: the production `SpeechSynthesizer` implementation.

mod client;

pub use client::{ElevenLabsConfig, ElevenLabsSynthesizer};
