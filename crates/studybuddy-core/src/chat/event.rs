use serde::Serialize;

use super::message::ChatMessage;

/// How prominent a notification should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

/// A transient, user-visible notice (the toast of the chat view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub level: NotificationLevel,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Info, title, description)
    }

    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Success, title, description)
    }

    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_level(NotificationLevel::Error, title, description)
    }

    fn with_level(
        level: NotificationLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            level,
        }
    }
}

/// Events published by a chat session for its renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    MessageAppended { index: usize, message: ChatMessage },
    LoadingChanged { is_loading: bool },
    RecordingChanged { is_recording: bool },
    SpeakingChanged { is_speaking: bool },
    InputChanged { text: String },
    Notification(Notification),
}
