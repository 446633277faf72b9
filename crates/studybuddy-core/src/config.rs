//! Application configuration model.
//!
//! Every field has a default so that a partial or missing `config.toml`
//! still yields a usable configuration.

use serde::{Deserialize, Serialize};

use crate::attachment::DEFAULT_MAX_ATTACHMENT_BYTES;

/// Root of `config.toml`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub voice: VoiceConfig,
    #[serde(default)]
    pub preferences: Preferences,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    #[serde(default = "default_reply_latency_ms")]
    pub reply_latency_ms: u64,
    #[serde(default = "default_hint_latency_ms")]
    pub hint_latency_ms: u64,
    #[serde(default = "default_max_attachment_bytes")]
    pub max_attachment_bytes: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_latency_ms: default_reply_latency_ms(),
            hint_latency_ms: default_hint_latency_ms(),
            max_attachment_bytes: default_max_attachment_bytes(),
        }
    }
}

/// Text-to-speech command, e.g. `["espeak"]` or `["say", "-v", "Samantha"]`.
///
/// The message text is appended as the final argument.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct VoiceConfig {
    #[serde(default)]
    pub narrator_command: Vec<String>,
}

/// Settings page toggles.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub sound_effects: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            sound_effects: true,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_reply_latency_ms() -> u64 {
    1000
}

fn default_hint_latency_ms() -> u64 {
    800
}

fn default_max_attachment_bytes() -> u64 {
    DEFAULT_MAX_ATTACHMENT_BYTES
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.chat.reply_latency_ms, 1000);
        assert_eq!(config.chat.hint_latency_ms, 800);
        assert_eq!(config.chat.max_attachment_bytes, 5 * 1024 * 1024);
        assert!(config.preferences.notifications);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [chat]
            reply_latency_ms = 10

            [voice]
            narrator_command = ["espeak", "-s", "140"]
            "#,
        )
        .unwrap();
        assert_eq!(config.chat.reply_latency_ms, 10);
        assert_eq!(config.chat.hint_latency_ms, 800);
        assert_eq!(config.voice.narrator_command.len(), 3);
        assert_eq!(config.logging.level, "info");
    }
}
