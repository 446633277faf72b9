pub mod attachment;
pub mod chat;
pub mod config;
pub mod error;
pub mod profile;
pub mod reply;
pub mod voice;

// Re-export common error type
pub use error::{Result, StudyBuddyError};
