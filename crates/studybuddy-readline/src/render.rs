//! Terminal drawing for pages and chat events.

use colored::Colorize;

use studybuddy_application::NAV_ITEMS;
use studybuddy_application::SettingsView;
use studybuddy_application::pages::{NotFoundPage, ProgressPage, Subject, WelcomePage};
use studybuddy_core::chat::{ChatEvent, ChatMessage, Notification, NotificationLevel};
use studybuddy_core::config::Preferences;
use studybuddy_core::profile::StudentProfile;

use crate::helper::COMMANDS;

pub fn heading(text: &str) {
    println!();
    println!("{}", text.bright_magenta().bold());
}

pub fn welcome(page: &WelcomePage) {
    heading(&page.heading);
    println!("{}", page.tagline.bright_black());
    println!();
    for feature in page.features {
        println!("  {} {}", "•".bright_blue(), feature.title.bold());
        println!("    {}", feature.description);
    }
    println!();
    println!(
        "{}",
        format!("{} → {}", page.call_to_action.label, page.call_to_action.target).bright_green()
    );
}

pub fn profile_badge(profile: &StudentProfile) {
    println!(
        "{} {}  {}",
        format!("({})", profile.initial()).bright_blue().bold(),
        profile.name.bold(),
        format!("Grade: {}", profile.grade.label()).bright_black()
    );
    let menu: Vec<String> = NAV_ITEMS
        .iter()
        .map(|item| format!("{} {}", item.label, item.path.bright_black()))
        .collect();
    println!("{}", menu.join("  |  "));
}

pub fn subjects() {
    heading("My Subjects");
    for subject in Subject::all() {
        println!("  {}", subject.to_string().bold());
        println!("    {}", subject.help_text().bright_black());
    }
}

pub fn progress(page: &ProgressPage) {
    heading("My Learning Progress");

    println!("{}", "Subject Progress".bold());
    for (name, share) in page.subject_shares() {
        println!("  {:<10} {}%", name, share);
    }

    println!("{}", "Weekly Activity".bold());
    for day in page.weekly_activity {
        println!("  {} {}", day.day, "▇".repeat(usize::from(day.sessions)).bright_blue());
    }

    println!("{}", "Overall Progress".bold());
    for bar in page.overall {
        let filled = usize::from(bar.percent) / 5;
        println!(
            "  {:<26} {}{} {}%",
            bar.label,
            "█".repeat(filled).bright_blue(),
            "░".repeat(20usize.saturating_sub(filled)).bright_black(),
            bar.percent
        );
    }

    println!("{}", "Learning Achievements".bold());
    for achievement in page.achievements {
        println!("  {} {}", "★".yellow(), achievement.title.bold());
        println!("    {}", achievement.description.bright_black());
    }
}

pub fn settings(view: &SettingsView) {
    heading("Settings");
    let profile = &view.profile;
    println!("  Full Name         {}", profile.name);
    println!("  Grade Level       {}", profile.grade);
    println!(
        "  Favorite Subject  {}",
        profile.favorite_subject.as_deref().unwrap_or("-")
    );
    println!(
        "  Learning Style    {}",
        profile
            .learning_style
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string())
    );
    println!("  Notifications     {}", on_off(view.preferences.notifications));
    println!("  Sound Effects     {}", on_off(view.preferences.sound_effects));
    println!("{}", "Change a value with /set <field> <value>".bright_black());
}

pub fn not_found(page: &NotFoundPage) {
    heading(NotFoundPage::CODE);
    println!("{}", NotFoundPage::MESSAGE);
    println!("{}", page.path.bright_black());
    println!("{}", format!("{} → /", NotFoundPage::RETURN_LABEL).bright_black());
}

pub fn help() {
    heading("Commands");
    for (cmd, description) in COMMANDS {
        println!("  {:<18} {}", cmd.bright_cyan(), description.bright_black());
    }
    println!(
        "{}",
        "On the dashboard, any other text is sent to StudyBuddy.".bright_black()
    );
}

pub fn notification(notification: &Notification) {
    let line = format!("{}: {}", notification.title, notification.description);
    match notification.level {
        NotificationLevel::Info => println!("{}", line.bright_black()),
        NotificationLevel::Success => println!("{}", line.green()),
        NotificationLevel::Error => eprintln!("{}", line.red()),
    }
}

pub fn error(message: impl std::fmt::Display) {
    eprintln!("{}", format!("Error: {}", message).red());
}

fn print_message(index: usize, message: &ChatMessage) {
    let time = message.timestamp.format("%H:%M");
    if message.is_assistant() {
        println!(
            "{}",
            format!("[{}] StudyBuddy {}", index, time).bright_magenta()
        );
        for line in message.content.lines() {
            println!("{}", line.bright_blue());
        }
    } else {
        println!("{}", format!("[{}] You {}", index, time).green());
        if !message.content.is_empty() {
            println!("{}", message.content);
        }
    }
    if let Some(attachment) = &message.attachment {
        println!(
            "{}",
            format!("  📎 {} ({})", attachment.file_name, attachment.preview_url).bright_black()
        );
    }
    println!();
}

/// Draws session events, honoring the notification and sound toggles.
#[derive(Debug, Default)]
pub struct ChatRenderer {
    /// Set between the end of a recording and its transcript arriving.
    awaiting_transcript: bool,
}

impl ChatRenderer {
    pub fn event(&mut self, event: &ChatEvent, preferences: &Preferences) {
        match event {
            ChatEvent::MessageAppended { index, message } => {
                print_message(*index, message);
                if message.is_assistant() && preferences.sound_effects {
                    print!("\x07");
                }
            }
            ChatEvent::LoadingChanged { is_loading: true } => {
                println!("{}", "StudyBuddy is thinking...".bright_black());
            }
            ChatEvent::LoadingChanged { is_loading: false } => {}
            ChatEvent::RecordingChanged { is_recording } => {
                if *is_recording {
                    println!("{}", "● Recording... type /record to stop".red());
                } else {
                    self.awaiting_transcript = true;
                }
            }
            ChatEvent::SpeakingChanged { is_speaking } => {
                if *is_speaking {
                    println!("{}", "🔊 Speaking... /speak again to stop".bright_black());
                }
            }
            ChatEvent::InputChanged { text } => {
                if self.awaiting_transcript && !text.is_empty() {
                    self.awaiting_transcript = false;
                    println!("{}", format!("Voice input: {}", text).yellow());
                    println!("{}", "Type /send to send it.".bright_black());
                }
            }
            ChatEvent::Notification(n) => {
                if n.level == NotificationLevel::Error {
                    self.awaiting_transcript = false;
                }
                if preferences.notifications || n.level == NotificationLevel::Error {
                    notification(n);
                }
            }
        }
    }
}

fn on_off(value: bool) -> &'static str {
    if value { "on" } else { "off" }
}
