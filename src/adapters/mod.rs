//! Adapters: implementations of the ports against the outside world.

pub mod anthropic;
pub mod elevenlabs;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;
pub mod tavus;
pub mod timeout;
pub mod vapi;
