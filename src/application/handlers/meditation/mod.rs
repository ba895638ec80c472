//! Meditation command handlers.

mod generate_meditation;

pub use generate_meditation::{
    GeneratedMeditation, GenerateMeditationCommand, GenerateMeditationHandler,
};
