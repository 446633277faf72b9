//! Voice capability interfaces.
//!
//! Speech capture, transcription and narration are provided by the platform.
//! The chat session only talks to these traits so that real adapters and
//! test fakes are interchangeable.

use async_trait::async_trait;
use thiserror::Error;

/// Audio buffered between `start` and `stop` of a capture.
///
/// Moved into the transcriber and dropped afterwards; it is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedAudio {
    pub chunks: Vec<Vec<u8>>,
    pub mime_type: String,
}

impl CapturedAudio {
    pub fn new(mime_type: impl Into<String>) -> Self {
        Self {
            chunks: Vec::new(),
            mime_type: mime_type.into(),
        }
    }

    pub fn push_chunk(&mut self, chunk: Vec<u8>) {
        self.chunks.push(chunk);
    }

    pub fn total_bytes(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }
}

/// Failures reported by voice collaborators.
///
/// Each kind has its own student-facing message.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VoiceError {
    #[error("Microphone access was denied. Please allow microphone access to use voice input.")]
    PermissionDenied,

    #[error("Voice features are not supported on this device.")]
    Unsupported,

    #[error("Sorry, I couldn't understand that: {0}")]
    RecognitionFailed(String),

    #[error("Could not read the message aloud: {0}")]
    Playback(String),
}

impl VoiceError {
    /// Notification title used by the chat session.
    pub fn title(&self) -> &'static str {
        match self {
            VoiceError::PermissionDenied => "Microphone blocked",
            VoiceError::Unsupported => "Voice unavailable",
            VoiceError::RecognitionFailed(_) => "Speech recognition failed",
            VoiceError::Playback(_) => "Narration failed",
        }
    }
}

/// Microphone capture with an explicit acquire/release lifecycle.
#[async_trait]
pub trait MicrophoneCapture: Send + Sync {
    /// Acquires the microphone and starts buffering audio.
    async fn start(&self) -> Result<(), VoiceError>;

    /// Stops buffering, releases the microphone and hands over the audio.
    async fn stop(&self) -> Result<CapturedAudio, VoiceError>;
}

/// Speech-to-text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: CapturedAudio) -> Result<String, VoiceError>;
}

/// Text-to-speech.
///
/// `speak` resolves when narration finishes. Dropping the returned future
/// must stop narration immediately.
#[async_trait]
pub trait Narrator: Send + Sync {
    async fn speak(&self, text: &str) -> Result<(), VoiceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_audio_counts_bytes() {
        let mut audio = CapturedAudio::new("audio/wav");
        audio.push_chunk(vec![0; 3]);
        audio.push_chunk(vec![0; 5]);
        assert_eq!(audio.total_bytes(), 8);
    }

    #[test]
    fn test_each_error_has_distinct_message() {
        let errors = [
            VoiceError::PermissionDenied,
            VoiceError::Unsupported,
            VoiceError::RecognitionFailed("noise".to_string()),
            VoiceError::Playback("device busy".to_string()),
        ];
        for (i, a) in errors.iter().enumerate() {
            for b in errors.iter().skip(i + 1) {
                assert_ne!(a.to_string(), b.to_string());
                assert_ne!(a.title(), b.title());
            }
        }
    }
}
