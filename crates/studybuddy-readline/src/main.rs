mod helper;
mod render;

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use strum::IntoEnumIterator;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use studybuddy_application::pages::{NotFoundPage, ProgressPage, WelcomePage};
use studybuddy_application::{Navigator, ProfileForm, ProfileFormUseCase, Route, SettingsUseCase};
use studybuddy_core::StudyBuddyError;
use studybuddy_core::chat::{ChatSession, ChatSessionConfig, Notification, VoiceCapabilities};
use studybuddy_core::config::Preferences;
use studybuddy_core::profile::{
    Grade, InMemoryProfileRepository, LearningStyle, ProfileChange, ProfileRepository,
};
use studybuddy_infrastructure::{
    ConfigService, JsonProfileRepository, StudyBuddyPaths, UnavailableMicrophone,
    UnavailableTranscriber, inspect_local_file, narrator_for,
};

use crate::helper::CliHelper;
use crate::render::ChatRenderer;

type Repl = Editor<CliHelper, DefaultHistory>;

#[derive(Parser)]
#[command(name = "studybuddy")]
#[command(about = "StudyBuddy - homework help that guides rather than just gives answers", long_about = None)]
struct Cli {
    /// Directory holding config.toml, storage.json and logs
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep the profile in memory only
    #[arg(long)]
    ephemeral: bool,
}

/// Installs a file logger so tracing output never interleaves with the REPL.
fn init_logging(paths: &StudyBuddyPaths, default_level: &str) -> Result<WorkerGuard> {
    let logs_dir = paths.logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("Failed to create {}", logs_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&logs_dir, "studybuddy.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log level '{}'", default_level))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

struct ActiveChat {
    session: ChatSession,
    renderer: JoinHandle<()>,
}

struct App {
    profiles: Arc<dyn ProfileRepository>,
    navigator: Navigator,
    profile_form: ProfileFormUseCase,
    settings: SettingsUseCase,
    chat_config: ChatSessionConfig,
    voice: VoiceCapabilities,
    preferences: watch::Sender<Preferences>,
    route: Route,
    chat: Option<ActiveChat>,
}

impl App {
    /// Resolves `requested` through the guard and draws the resulting page.
    async fn open(&mut self, requested: Route, rl: &mut Repl) -> Result<()> {
        let mut requested = requested;
        loop {
            let route = self.navigator.resolve(requested).await?;
            self.leave_chat_for(&route).await;
            self.route = route.clone();

            match route {
                Route::Welcome => {
                    let profile = self.profiles.load().await?;
                    render::welcome(&WelcomePage::for_profile(profile.as_ref()));
                }
                Route::Profile => {
                    if let Some(next) = self.run_profile_form(rl).await? {
                        requested = next;
                        continue;
                    }
                }
                Route::Dashboard => {
                    self.enter_dashboard().await?;
                }
                Route::Subjects => {
                    self.badge().await?;
                    render::subjects();
                }
                Route::Progress => {
                    self.badge().await?;
                    render::progress(&ProgressPage::sample());
                }
                Route::Settings => {
                    self.badge().await?;
                    render::settings(&self.settings.view().await?);
                }
                Route::NotFound(path) => {
                    render::not_found(&NotFoundPage::new(path));
                }
            }
            return Ok(());
        }
    }

    async fn badge(&self) -> Result<()> {
        if let Some(profile) = self.profiles.load().await? {
            render::profile_badge(&profile);
        }
        Ok(())
    }

    /// Collects the profile form. Returns the next route once saved.
    async fn run_profile_form(&mut self, rl: &mut Repl) -> Result<Option<Route>> {
        render::heading("Create your profile");
        println!("{}", "Press Ctrl-C to cancel.".bright_black());

        let Some(name) = prompt(rl, "Name: ")? else {
            return Ok(None);
        };

        let grades: Vec<String> = Grade::iter()
            .enumerate()
            .map(|(i, g)| format!("{}) {} ({})", i + 1, g, g.label()))
            .collect();
        println!("{}", grades.join("  ").bright_black());
        let Some(grade) = prompt(rl, "Grade: ")? else {
            return Ok(None);
        };

        let Some(subject) = prompt(rl, "Favorite subject (optional): ")? else {
            return Ok(None);
        };

        let styles: Vec<String> = LearningStyle::iter().map(|s| s.to_string()).collect();
        println!("{}", styles.join(", ").bright_black());
        let Some(style) = prompt(rl, "Learning style (optional): ")? else {
            return Ok(None);
        };

        let form = ProfileForm {
            name,
            grade: parse_grade(&grade),
            favorite_subject: Some(subject),
            learning_style: LearningStyle::from_str(style.trim()).ok(),
        };

        match self.profile_form.submit(form).await {
            Ok((profile, next)) => {
                render::notification(&Notification::success(
                    "Profile created",
                    format!("Welcome aboard, {}!", profile.name),
                ));
                Ok(Some(next))
            }
            Err(StudyBuddyError::Validation(message)) => {
                render::notification(&Notification::error("Missing information", message));
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Starts a fresh chat view, discarding any earlier log.
    async fn enter_dashboard(&mut self) -> Result<()> {
        self.badge().await?;
        self.stop_chat().await;

        let (session, mut events) = ChatSession::start(
            Arc::clone(&self.profiles),
            self.chat_config,
            self.voice.clone(),
            Box::new(StdRng::from_entropy()),
        )
        .await?;

        let preferences = self.preferences.subscribe();
        let renderer = tokio::spawn(async move {
            let mut renderer = ChatRenderer::default();
            while let Some(event) = events.recv().await {
                let current = preferences.borrow().clone();
                renderer.event(&event, &current);
            }
        });

        self.chat = Some(ActiveChat { session, renderer });
        Ok(())
    }

    /// Tears the chat view down unless `route` is the dashboard.
    async fn leave_chat_for(&mut self, route: &Route) {
        if *route != Route::Dashboard {
            self.stop_chat().await;
        }
    }

    async fn stop_chat(&mut self) {
        if let Some(chat) = self.chat.take() {
            chat.session.shutdown().await;
            drop(chat.session);
            chat.renderer.abort();
        }
    }

    /// Session for chat commands, only while the dashboard is showing.
    fn session(&self) -> Option<&ChatSession> {
        match (&self.route, &self.chat) {
            (Route::Dashboard, Some(chat)) => Some(&chat.session),
            _ => {
                println!("{}", "Open /dashboard to chat with StudyBuddy.".bright_black());
                None
            }
        }
    }

    /// Handles one input line. Returns `false` when the user quits.
    async fn handle_line(&mut self, line: &str, rl: &mut Repl) -> Result<bool> {
        let (command, arg) = match line.split_once(' ') {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "/quit" | "quit" | "exit" => return Ok(false),
            "/help" => render::help(),
            "/home" => self.open(Route::Welcome, rl).await?,
            "/profile" | "/dashboard" | "/subjects" | "/progress" | "/settings" => {
                self.open(Route::parse(command), rl).await?
            }
            "/go" => self.open(Route::parse(arg), rl).await?,
            "/logout" => {
                self.stop_chat().await;
                let next = self.navigator.logout().await?;
                self.open(next, rl).await?;
            }
            "/set" => self.apply_setting(arg).await?,
            "/hint" => {
                if let Some(session) = self.session() {
                    session.request_hint().await;
                }
            }
            "/send" => {
                if let Some(session) = self.session() {
                    if !session.send_message().await {
                        println!("{}", "Nothing to send.".bright_black());
                    }
                }
            }
            "/record" => {
                if let Some(session) = self.session() {
                    session.toggle_recording().await;
                }
            }
            "/attach" => {
                if let Some(session) = self.session() {
                    attach(session, arg).await;
                }
            }
            "/clear-attachment" => {
                if let Some(session) = self.session() {
                    match session.clear_attachment().await {
                        Some(file) => println!("{}", format!("Removed {}", file.file_name).bright_black()),
                        None => println!("{}", "No file attached.".bright_black()),
                    }
                }
            }
            "/speak" => {
                if let Some(session) = self.session() {
                    speak(session, arg).await;
                }
            }
            _ if command.starts_with('/') => {
                println!("{}", "Unknown command. Type /help.".bright_black());
            }
            _ => {
                if let Some(session) = self.session() {
                    session.set_input(line).await;
                    session.send_message().await;
                }
            }
        }
        Ok(true)
    }

    async fn apply_setting(&mut self, arg: &str) -> Result<()> {
        let (field, value) = match arg.split_once(' ') {
            Some((field, value)) => (field, value.trim()),
            None => (arg, ""),
        };

        let change = match field {
            "name" => ProfileChange::Name(value.to_string()),
            "grade" => match parse_grade(value) {
                Some(grade) => ProfileChange::Grade(grade),
                None => {
                    render::error(format!("Unknown grade '{}'", value));
                    return Ok(());
                }
            },
            "subject" => ProfileChange::FavoriteSubject(optional(value).map(str::to_string)),
            "style" => match optional(value) {
                None => ProfileChange::LearningStyle(None),
                Some(v) => match LearningStyle::from_str(v) {
                    Ok(style) => ProfileChange::LearningStyle(Some(style)),
                    Err(_) => {
                        render::error(format!("Unknown learning style '{}'", v));
                        return Ok(());
                    }
                },
            },
            "notifications" | "sound" => {
                let Some(enabled) = parse_switch(value) else {
                    render::error("Use on or off");
                    return Ok(());
                };
                let mut preferences = self.preferences.borrow().clone();
                if field == "notifications" {
                    preferences.notifications = enabled;
                } else {
                    preferences.sound_effects = enabled;
                }
                let notification = self.settings.save_preferences(preferences.clone())?;
                self.preferences.send_replace(preferences);
                render::notification(&notification);
                return Ok(());
            }
            _ => {
                render::error("Usage: /set name|grade|subject|style|notifications|sound <value>");
                return Ok(());
            }
        };

        match self.settings.update_profile(vec![change]).await {
            Ok((_, notification)) => {
                // The running session greets with the old profile
                self.stop_chat().await;
                render::notification(&notification);
            }
            Err(e) => render::error(e),
        }
        Ok(())
    }
}

async fn attach(session: &ChatSession, path: &str) {
    if path.is_empty() {
        render::error("Usage: /attach <path>");
        return;
    }
    match inspect_local_file(Path::new(path)).await {
        // Size errors are reported by the session itself
        Ok(file) => {
            if let Err(e) = session.attach_file(file).await {
                tracing::debug!("[Repl] Attachment rejected: {}", e);
            }
        }
        Err(e) => render::error(e),
    }
}

async fn speak(session: &ChatSession, arg: &str) {
    let index = if arg.is_empty() {
        let snapshot = session.snapshot().await;
        match snapshot.messages.iter().rposition(|m| m.is_assistant()) {
            Some(index) => index,
            None => return,
        }
    } else {
        match arg.parse::<usize>() {
            Ok(index) => index,
            Err(_) => {
                render::error("Usage: /speak [message number]");
                return;
            }
        }
    };

    if let Err(e) = session.speak_message(index).await {
        render::error(e);
    }
}

/// Reads one answer. `None` means the user cancelled.
fn prompt(rl: &mut Repl, label: &str) -> Result<Option<String>> {
    match rl.readline(label) {
        Ok(line) => Ok(Some(line.trim().to_string())),
        Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
            println!("{}", "Cancelled.".yellow());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Accepts a grade name or its number in the list.
fn parse_grade(value: &str) -> Option<Grade> {
    let value = value.trim();
    if let Ok(n) = value.parse::<usize>() {
        return n.checked_sub(1).and_then(|i| Grade::iter().nth(i));
    }
    Grade::from_str(value).ok()
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

fn optional(value: &str) -> Option<&str> {
    match value.trim() {
        "" | "-" => None,
        v => Some(v),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ===== Backend Initialization =====
    let paths = StudyBuddyPaths::resolve(cli.data_dir)?;
    let config_service = ConfigService::new(paths.config_file());
    let config = config_service
        .load_or_init()
        .with_context(|| format!("Failed to load {}", paths.config_file().display()))?;
    let _log_guard = init_logging(&paths, &config.logging.level)?;
    tracing::info!("[Startup] Base directory: {}", paths.base_dir().display());

    let profiles: Arc<dyn ProfileRepository> = if cli.ephemeral {
        tracing::info!("[Startup] Ephemeral profile storage");
        Arc::new(InMemoryProfileRepository::new())
    } else {
        Arc::new(JsonProfileRepository::new(paths.storage_file()))
    };

    let voice = VoiceCapabilities {
        microphone: Arc::new(UnavailableMicrophone),
        transcriber: Arc::new(UnavailableTranscriber),
        narrator: narrator_for(&config.voice.narrator_command),
    };
    let (preferences, _) = watch::channel(config.preferences.clone());

    let mut app = App {
        navigator: Navigator::new(Arc::clone(&profiles)),
        profile_form: ProfileFormUseCase::new(Arc::clone(&profiles)),
        settings: SettingsUseCase::new(Arc::clone(&profiles), config_service),
        profiles,
        chat_config: ChatSessionConfig::from(&config.chat),
        voice,
        preferences,
        route: Route::Welcome,
        chat: None,
    };

    // ===== REPL Setup =====
    let mut rl: Repl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== StudyBuddy ===".bright_magenta().bold());
    println!("{}", "Type /help for commands, or /quit to exit.".bright_black());

    app.open(Route::Welcome, &mut rl).await?;

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match app.handle_line(trimmed, &mut rl).await {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    Err(e) => {
                        tracing::error!("[Repl] {:#}", e);
                        render::error(format!("{:#}", e));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    app.stop_chat().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use studybuddy_core::profile::StudentProfile;

    #[test]
    fn test_parse_grade_by_name_or_number() {
        assert_eq!(parse_grade("middle"), Some(Grade::Middle));
        assert_eq!(parse_grade("HighSchool"), Some(Grade::HighSchool));
        assert_eq!(parse_grade("1"), Some(Grade::Preschool));
        assert_eq!(parse_grade("7"), Some(Grade::College));
        assert_eq!(parse_grade("0"), None);
        assert_eq!(parse_grade("8"), None);
        assert_eq!(parse_grade(""), None);
    }

    #[test]
    fn test_parse_switch_and_optional() {
        assert_eq!(parse_switch("ON"), Some(true));
        assert_eq!(parse_switch("off"), Some(false));
        assert_eq!(parse_switch("maybe"), None);
        assert_eq!(optional(" - "), None);
        assert_eq!(optional("Art"), Some("Art"));
    }

    fn app(data_dir: &Path, profile: Option<StudentProfile>) -> App {
        let profiles: Arc<dyn ProfileRepository> = Arc::new(match profile {
            Some(profile) => InMemoryProfileRepository::with_profile(profile),
            None => InMemoryProfileRepository::new(),
        });
        let (preferences, _) = watch::channel(Preferences::default());
        App {
            navigator: Navigator::new(Arc::clone(&profiles)),
            profile_form: ProfileFormUseCase::new(Arc::clone(&profiles)),
            settings: SettingsUseCase::new(
                Arc::clone(&profiles),
                ConfigService::new(data_dir.join("config.toml")),
            ),
            profiles,
            chat_config: ChatSessionConfig::default(),
            voice: VoiceCapabilities {
                microphone: Arc::new(UnavailableMicrophone),
                transcriber: Arc::new(UnavailableTranscriber),
                narrator: narrator_for(&[]),
            },
            preferences,
            route: Route::Welcome,
            chat: None,
        }
    }

    fn ada() -> StudentProfile {
        StudentProfile::new("Ada", Some(Grade::Middle), None, None).unwrap()
    }

    #[tokio::test]
    async fn test_leaving_dashboard_discards_chat() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), Some(ada()));

        app.enter_dashboard().await.unwrap();
        let session = &app.chat.as_ref().unwrap().session;
        session.set_input("what is a fraction").await;
        assert!(session.send_message().await);
        assert_eq!(session.snapshot().await.messages.len(), 2);

        app.leave_chat_for(&Route::Dashboard).await;
        assert!(app.chat.is_some());

        for route in [
            Route::Subjects,
            Route::Progress,
            Route::Settings,
            Route::Welcome,
            Route::NotFound("/nowhere".to_string()),
        ] {
            app.enter_dashboard().await.unwrap();
            app.leave_chat_for(&route).await;
            assert!(app.chat.is_none(), "chat survived {}", route);
        }
    }

    #[tokio::test]
    async fn test_each_dashboard_entry_starts_with_welcome() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app(dir.path(), Some(ada()));

        app.enter_dashboard().await.unwrap();
        let session = &app.chat.as_ref().unwrap().session;
        session.set_input("hello").await;
        session.send_message().await;

        app.enter_dashboard().await.unwrap();
        let snapshot = app.chat.as_ref().unwrap().session.snapshot().await;
        assert_eq!(snapshot.messages.len(), 1);
        assert!(snapshot.messages[0].content.starts_with("Hi Ada!"));

        app.stop_chat().await;
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from(["studybuddy", "--data-dir", "/tmp/sb", "--ephemeral"]);
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/sb")));
        assert!(cli.ephemeral);
    }
}
