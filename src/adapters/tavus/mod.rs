//! Tavus adapter: the production `VideoAvatarService` implementation.

mod client;

pub use client::{TavusConfig, TavusVideoService};
