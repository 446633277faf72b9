use std::sync::Arc;
use std::time::Duration;

use rand::RngCore;
use tokio::sync::{Mutex, mpsc};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use super::event::{ChatEvent, Notification};
use super::message::ChatMessage;
use crate::attachment::{AttachmentHandler, AttachmentRef, LocalFile};
use crate::config::ChatConfig;
use crate::error::{Result, StudyBuddyError};
use crate::profile::{ProfileRepository, StudentProfile};
use crate::reply;
use crate::voice::{MicrophoneCapture, Narrator, Transcriber, VoiceError};

/// Timing and limits for a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChatSessionConfig {
    pub reply_latency: Duration,
    pub hint_latency: Duration,
    pub max_attachment_bytes: u64,
}

impl Default for ChatSessionConfig {
    fn default() -> Self {
        Self::from(&ChatConfig::default())
    }
}

impl From<&ChatConfig> for ChatSessionConfig {
    fn from(config: &ChatConfig) -> Self {
        Self {
            reply_latency: Duration::from_millis(config.reply_latency_ms),
            hint_latency: Duration::from_millis(config.hint_latency_ms),
            max_attachment_bytes: config.max_attachment_bytes,
        }
    }
}

/// Platform voice collaborators injected into a session.
#[derive(Clone)]
pub struct VoiceCapabilities {
    pub microphone: Arc<dyn MicrophoneCapture>,
    pub transcriber: Arc<dyn Transcriber>,
    pub narrator: Arc<dyn Narrator>,
}

/// Read-only copy of the session state for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSnapshot {
    pub messages: Vec<ChatMessage>,
    pub input_text: String,
    pub is_loading: bool,
    pub is_recording: bool,
    pub is_speaking: bool,
    pub pending_attachment: Option<AttachmentRef>,
}

#[derive(Default)]
struct ChatState {
    messages: Vec<ChatMessage>,
    input_text: String,
    pending_jobs: usize,
    is_recording: bool,
    pending_attachment: Option<AttachmentRef>,
    /// Active narration: generation number and its cancellation token.
    narration: Option<(u64, CancellationToken)>,
    narration_generation: u64,
}

impl ChatState {
    fn snapshot(&self) -> ChatSnapshot {
        ChatSnapshot {
            messages: self.messages.clone(),
            input_text: self.input_text.clone(),
            is_loading: self.pending_jobs > 0,
            is_recording: self.is_recording,
            is_speaking: self.narration.is_some(),
            pending_attachment: self.pending_attachment.clone(),
        }
    }
}

struct ReplyJob {
    message: String,
    /// The log as it stood before the student's message was appended.
    history: Vec<ChatMessage>,
    due: Instant,
}

/// Owns the chat log and drives replies, voice and attachments.
///
/// Answers are produced by a single worker task so they append in the order
/// their messages were sent, each no earlier than its own latency after the
/// request. Hints run on their own timers and land independently of any
/// answer still pending. Dropping the session or calling
/// [`ChatSession::shutdown`] cancels everything still pending.
pub struct ChatSession {
    profile: StudentProfile,
    config: ChatSessionConfig,
    state: Arc<Mutex<ChatState>>,
    events: mpsc::UnboundedSender<ChatEvent>,
    jobs: mpsc::UnboundedSender<ReplyJob>,
    voice: VoiceCapabilities,
    attachments: AttachmentHandler,
    shutdown: CancellationToken,
}

impl ChatSession {
    /// Loads the profile and opens a session seeded with the welcome message.
    ///
    /// Must be called inside a Tokio runtime; the reply worker is spawned here.
    ///
    /// # Errors
    ///
    /// `StudyBuddyError::MissingProfile` when no profile is stored, or the
    /// repository's own error when it cannot be read.
    pub async fn start(
        repository: Arc<dyn ProfileRepository>,
        config: ChatSessionConfig,
        voice: VoiceCapabilities,
        rng: Box<dyn RngCore + Send>,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ChatEvent>)> {
        let profile = repository
            .load()
            .await?
            .ok_or(StudyBuddyError::MissingProfile)?;

        let (events, events_rx) = mpsc::unbounded_channel();
        let (jobs, jobs_rx) = mpsc::unbounded_channel();
        let state = Arc::new(Mutex::new(ChatState::default()));
        let shutdown = CancellationToken::new();

        let session = Self {
            attachments: AttachmentHandler::new(config.max_attachment_bytes),
            profile,
            config,
            state,
            events,
            jobs,
            voice,
            shutdown,
        };

        {
            let mut state = session.state.lock().await;
            append(
                &mut state,
                &session.events,
                ChatMessage::assistant(reply::welcome(&session.profile.name)),
            );
        }

        let worker = ReplyWorker {
            profile: session.profile.clone(),
            state: Arc::clone(&session.state),
            events: session.events.clone(),
            shutdown: session.shutdown.clone(),
            rng,
        };
        tokio::spawn(worker.run(jobs_rx));

        tracing::info!("[ChatSession] Started for {}", session.profile.name);
        Ok((session, events_rx))
    }

    pub fn profile(&self) -> &StudentProfile {
        &self.profile
    }

    pub async fn snapshot(&self) -> ChatSnapshot {
        self.state.lock().await.snapshot()
    }

    /// Replaces the text in the input box.
    pub async fn set_input(&self, text: impl Into<String>) {
        let text = text.into();
        let mut state = self.state.lock().await;
        state.input_text = text.clone();
        self.emit(ChatEvent::InputChanged { text });
    }

    /// Sends the current input (and pending attachment) as a student message.
    ///
    /// Returns `false` without touching any state when there is nothing to
    /// send.
    pub async fn send_message(&self) -> bool {
        let mut state = self.state.lock().await;
        let has_text = !state.input_text.trim().is_empty();
        if !has_text && state.pending_attachment.is_none() {
            return false;
        }

        let history = state.messages.clone();
        let input = std::mem::take(&mut state.input_text);
        let attachment = state.pending_attachment.take();
        let content = match (&attachment, has_text) {
            (Some(file), false) => format!("📎 {}", file.file_name),
            _ => input.clone(),
        };

        append(
            &mut state,
            &self.events,
            ChatMessage::student(content, attachment),
        );
        self.emit(ChatEvent::InputChanged {
            text: String::new(),
        });

        tracing::debug!(
            "[ChatSession] Queued reply for message #{}",
            state.messages.len() - 1
        );
        let job = ReplyJob {
            message: input,
            history,
            due: Instant::now() + self.config.reply_latency,
        };
        if self.jobs.send(job).is_err() {
            tracing::warn!("[ChatSession] Reply worker is gone; dropping request");
            return true;
        }
        self.begin_reply(&mut state);
        true
    }

    /// Appends the fixed hint after the hint latency.
    ///
    /// Each hint has its own timer, so it never waits behind a pending answer.
    pub async fn request_hint(&self) {
        let mut state = self.state.lock().await;
        self.begin_reply(&mut state);
        drop(state);

        let due = Instant::now() + self.config.hint_latency;
        let content = reply::hint(&self.profile.name);
        let token = self.shutdown.child_token();
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => return,
                _ = tokio::time::sleep_until(due) => {}
            }

            let mut state = state.lock().await;
            if token.is_cancelled() {
                return;
            }
            finish_reply(&mut state, &events, content);
            let _ = events.send(ChatEvent::Notification(Notification::success(
                "Hint provided",
                "Try using this hint to move forward with your problem.",
            )));
        });
    }

    /// Starts recording, or stops it and transcribes into the input box.
    pub async fn toggle_recording(&self) {
        let is_recording = self.state.lock().await.is_recording;

        if !is_recording {
            match self.voice.microphone.start().await {
                Ok(()) => {
                    self.state.lock().await.is_recording = true;
                    self.emit(ChatEvent::RecordingChanged { is_recording: true });
                    self.notify(Notification::info(
                        "Recording started",
                        "Speak your question, then stop recording when you're done.",
                    ));
                }
                Err(e) => {
                    tracing::warn!("[ChatSession] Microphone unavailable: {}", e);
                    self.notify_voice_error(&e);
                }
            }
            return;
        }

        self.state.lock().await.is_recording = false;
        self.emit(ChatEvent::RecordingChanged {
            is_recording: false,
        });

        let transcript = match self.voice.microphone.stop().await {
            // The audio is moved into the transcriber and dropped with it
            Ok(audio) => self.voice.transcriber.transcribe(audio).await,
            Err(e) => Err(e),
        };

        match transcript {
            Ok(text) => {
                self.set_input(text).await;
                self.notify(Notification::success(
                    "Voice captured",
                    "Your question has been added to the message box.",
                ));
            }
            Err(e) => {
                tracing::warn!("[ChatSession] Transcription failed: {}", e);
                self.notify_voice_error(&e);
            }
        }
    }

    /// Validates `file` and keeps it for the next message.
    ///
    /// # Errors
    ///
    /// `StudyBuddyError::AttachmentTooLarge` when the file is over the limit;
    /// the pending attachment is left as it was.
    pub async fn attach_file(&self, file: LocalFile) -> Result<AttachmentRef> {
        match self.attachments.accept(file) {
            Ok(attachment) => {
                self.state.lock().await.pending_attachment = Some(attachment.clone());
                self.notify(Notification::success(
                    "File attached",
                    format!("{} is ready to send.", attachment.file_name),
                ));
                Ok(attachment)
            }
            Err(e) => {
                self.notify(Notification::error(
                    "File too large",
                    format!(
                        "Please choose a file smaller than {}MB.",
                        self.attachments.max_bytes() / (1024 * 1024)
                    ),
                ));
                Err(e)
            }
        }
    }

    /// Drops the pending attachment, if any.
    pub async fn clear_attachment(&self) -> Option<AttachmentRef> {
        self.state.lock().await.pending_attachment.take()
    }

    /// Reads the assistant message at `index` aloud, or stops narration if
    /// something is already being read.
    ///
    /// # Errors
    ///
    /// `StudyBuddyError::NotFound` if `index` is not an assistant message.
    pub async fn speak_message(&self, index: usize) -> Result<()> {
        let mut state = self.state.lock().await;

        if let Some((_, token)) = state.narration.take() {
            token.cancel();
            self.emit(ChatEvent::SpeakingChanged { is_speaking: false });
            return Ok(());
        }

        let text = state
            .messages
            .get(index)
            .filter(|m| m.is_assistant())
            .map(|m| m.content.clone())
            .ok_or_else(|| StudyBuddyError::not_found("assistant message", index.to_string()))?;

        state.narration_generation += 1;
        let generation = state.narration_generation;
        let token = self.shutdown.child_token();
        state.narration = Some((generation, token.clone()));
        self.emit(ChatEvent::SpeakingChanged { is_speaking: true });
        drop(state);

        let narrator = Arc::clone(&self.voice.narrator);
        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => None,
                result = narrator.speak(&text) => Some(result),
            };
            let Some(result) = outcome else {
                return;
            };

            let mut state = state.lock().await;
            if state.narration.as_ref().map(|(current, _)| *current) != Some(generation) {
                return;
            }
            state.narration = None;
            let _ = events.send(ChatEvent::SpeakingChanged { is_speaking: false });
            if let Err(e) = result {
                tracing::warn!("[ChatSession] Narration failed: {}", e);
                let _ = events.send(ChatEvent::Notification(Notification::error(
                    e.title(),
                    e.to_string(),
                )));
            }
        });
        Ok(())
    }

    /// Cancels pending replies and narration and releases the microphone.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();

        let was_recording = {
            let mut state = self.state.lock().await;
            if let Some((_, token)) = state.narration.take() {
                token.cancel();
            }
            std::mem::replace(&mut state.is_recording, false)
        };

        if was_recording {
            if let Err(e) = self.voice.microphone.stop().await {
                tracing::warn!("[ChatSession] Failed to release microphone: {}", e);
            }
        }
        tracing::info!("[ChatSession] Shut down");
    }

    fn begin_reply(&self, state: &mut ChatState) {
        state.pending_jobs += 1;
        if state.pending_jobs == 1 {
            self.emit(ChatEvent::LoadingChanged { is_loading: true });
        }
    }

    fn notify_voice_error(&self, error: &VoiceError) {
        self.notify(Notification::error(error.title(), error.to_string()));
    }

    fn notify(&self, notification: Notification) {
        self.emit(ChatEvent::Notification(notification));
    }

    fn emit(&self, event: ChatEvent) {
        let _ = self.events.send(event);
    }
}

impl Drop for ChatSession {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

fn append(state: &mut ChatState, events: &mpsc::UnboundedSender<ChatEvent>, message: ChatMessage) {
    state.messages.push(message.clone());
    let _ = events.send(ChatEvent::MessageAppended {
        index: state.messages.len() - 1,
        message,
    });
}

/// Appends an assistant reply and clears the loading flag once nothing is pending.
fn finish_reply(state: &mut ChatState, events: &mpsc::UnboundedSender<ChatEvent>, content: String) {
    append(state, events, ChatMessage::assistant(content));
    state.pending_jobs = state.pending_jobs.saturating_sub(1);
    if state.pending_jobs == 0 {
        let _ = events.send(ChatEvent::LoadingChanged { is_loading: false });
    }
}

struct ReplyWorker {
    profile: StudentProfile,
    state: Arc<Mutex<ChatState>>,
    events: mpsc::UnboundedSender<ChatEvent>,
    shutdown: CancellationToken,
    rng: Box<dyn RngCore + Send>,
}

impl ReplyWorker {
    async fn run(mut self, mut jobs: mpsc::UnboundedReceiver<ReplyJob>) {
        loop {
            let job = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                job = jobs.recv() => match job {
                    Some(job) => job,
                    None => break,
                },
            };

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep_until(job.due) => {}
            }

            let content =
                reply::generate(&job.message, &self.profile, &job.history, self.rng.as_mut());

            let mut state = self.state.lock().await;
            if self.shutdown.is_cancelled() {
                break;
            }
            finish_reply(&mut state, &self.events, content);
        }
        tracing::debug!("[ChatSession] Reply worker stopped");
    }
}
