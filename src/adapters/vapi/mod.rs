//! Vapi adapter: the production `VoiceAgent` implementation.

mod client;

pub use client::{VapiConfig, VapiVoiceAgent};
