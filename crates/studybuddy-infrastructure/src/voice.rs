//! Voice adapters for terminal hosts.
//!
//! A terminal has no microphone permission model or recognizer, so capture
//! and transcription report `Unsupported`. Narration shells out to a
//! configured text-to-speech command.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;

use studybuddy_core::voice::{
    CapturedAudio, MicrophoneCapture, Narrator, Transcriber, VoiceError,
};

/// Microphone stand-in for hosts without audio capture.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableMicrophone;

#[async_trait]
impl MicrophoneCapture for UnavailableMicrophone {
    async fn start(&self) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }

    async fn stop(&self) -> Result<CapturedAudio, VoiceError> {
        Err(VoiceError::Unsupported)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTranscriber;

#[async_trait]
impl Transcriber for UnavailableTranscriber {
    async fn transcribe(&self, _audio: CapturedAudio) -> Result<String, VoiceError> {
        Err(VoiceError::Unsupported)
    }
}

/// Narrator used when no text-to-speech command is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentNarrator;

#[async_trait]
impl Narrator for SilentNarrator {
    async fn speak(&self, _text: &str) -> Result<(), VoiceError> {
        Err(VoiceError::Unsupported)
    }
}

/// Speaks text by running an external program, e.g. `espeak` or `say`.
///
/// The text is passed as the final argument. Dropping the `speak` future
/// kills the child, which is how a newer narration request stops an older
/// one.
#[derive(Debug, Clone)]
pub struct CommandNarrator {
    program: String,
    args: Vec<String>,
}

impl CommandNarrator {
    /// Builds a narrator from `[voice] narrator_command`.
    ///
    /// Returns `None` for an empty command.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        if program.trim().is_empty() {
            return None;
        }
        Some(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn build_command(&self, text: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Narrator for CommandNarrator {
    async fn speak(&self, text: &str) -> Result<(), VoiceError> {
        tracing::debug!("[CommandNarrator] Running {}", self.program);

        let output = self.build_command(text).output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                VoiceError::Unsupported
            } else {
                VoiceError::Playback(e.to_string())
            }
        })?;

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!(
                "[CommandNarrator] {} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            );
            Err(VoiceError::Playback(format!(
                "{} exited with {}",
                self.program, output.status
            )))
        }
    }
}

/// Picks the narrator for the configured command.
pub fn narrator_for(command: &[String]) -> std::sync::Arc<dyn Narrator> {
    match CommandNarrator::from_command(command) {
        Some(narrator) => std::sync::Arc::new(narrator),
        None => std::sync::Arc::new(SilentNarrator),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unavailable_adapters_report_unsupported() {
        assert_eq!(
            UnavailableMicrophone.start().await,
            Err(VoiceError::Unsupported)
        );
        assert_eq!(
            UnavailableTranscriber
                .transcribe(CapturedAudio::new("audio/webm"))
                .await,
            Err(VoiceError::Unsupported)
        );
        assert_eq!(SilentNarrator.speak("hi").await, Err(VoiceError::Unsupported));
    }

    #[test]
    fn test_empty_command_has_no_narrator() {
        assert!(CommandNarrator::from_command(&[]).is_none());
        assert!(CommandNarrator::from_command(&["  ".to_string()]).is_none());
        let narrator =
            CommandNarrator::from_command(&["say".to_string(), "-v".to_string(), "Samantha".to_string()])
                .unwrap();
        assert_eq!(narrator.program, "say");
        assert_eq!(narrator.args, vec!["-v".to_string(), "Samantha".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_program_is_unsupported() {
        let narrator =
            CommandNarrator::from_command(&["studybuddy-no-such-tts-binary".to_string()]).unwrap();
        assert_eq!(narrator.speak("hello").await, Err(VoiceError::Unsupported));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_exit_status_maps_to_playback_error() {
        let ok = CommandNarrator::from_command(&["true".to_string()]).unwrap();
        assert_eq!(ok.speak("hello").await, Ok(()));

        let failing = CommandNarrator::from_command(&["false".to_string()]).unwrap();
        assert!(matches!(
            failing.speak("hello").await,
            Err(VoiceError::Playback(_))
        ));
    }
}
