//! Anthropic adapter: the production `ChatProvider` implementation.

mod client;

pub use client::{AnthropicClient, AnthropicConfig};
