//! Voice and video session command handlers.

mod start_voice_call;
mod video_session;

pub use start_voice_call::{StartVoiceCallCommand, StartVoiceCallHandler};
pub use video_session::{
    EndVideoSessionCommand, StartVideoSessionCommand, VideoSessionHandler,
};
