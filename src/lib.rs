//! Mindhaven - Mental Wellness Companion Backend
//!
//! Coordinates AI chat, voice calls, video avatar sessions, guided
//! meditation and journaling, with subscription billing as the
//! correctness-sensitive core: payment signature verification and
//! idempotent entitlement transitions.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
