//! Chat message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::attachment::AttachmentRef;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    Student,
    Assistant,
}

/// A single entry in the chat log.
///
/// Only student messages ever carry an attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentRef>,
}

impl ChatMessage {
    pub fn student(content: impl Into<String>, attachment: Option<AttachmentRef>) -> Self {
        Self {
            role: ChatRole::Student,
            content: content.into(),
            timestamp: Utc::now(),
            attachment,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            attachment: None,
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.role == ChatRole::Assistant
    }

    pub fn is_student(&self) -> bool {
        self.role == ChatRole::Student
    }
}
