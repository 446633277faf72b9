//! Chat domain module.
//!
//! # Module Structure
//!
//! - `message`: Chat log entries (`ChatRole`, `ChatMessage`)
//! - `event`: Events and notifications published to the renderer
//! - `session`: The chat session controller (`ChatSession`)

mod event;
mod message;
mod session;


// Re-export public API
pub use event::{ChatEvent, Notification, NotificationLevel};
pub use message::{ChatMessage, ChatRole};
pub use session::{ChatSession, ChatSessionConfig, ChatSnapshot, VoiceCapabilities};
