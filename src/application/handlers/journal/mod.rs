//! Journal command handlers.

mod entries;

pub use entries::{CreateEntryCommand, DeleteEntryCommand, JournalHandler};
