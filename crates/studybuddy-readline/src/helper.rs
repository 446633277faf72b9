use std::borrow::Cow::{self, Borrowed, Owned};

use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use strum::IntoEnumIterator;

use studybuddy_application::Route;
use studybuddy_core::profile::{Grade, LearningStyle};

/// Slash commands with their one-line help.
pub const COMMANDS: &[(&str, &str)] = &[
    ("/home", "welcome page"),
    ("/profile", "create your profile"),
    ("/dashboard", "chat with StudyBuddy"),
    ("/subjects", "browse subjects"),
    ("/progress", "see your progress"),
    ("/settings", "view settings"),
    ("/set", "change a setting: name|grade|subject|style|notifications|sound <value>"),
    ("/go", "open a page by path"),
    ("/hint", "ask for a hint"),
    ("/attach", "attach a file: /attach <path>"),
    ("/clear-attachment", "remove the pending attachment"),
    ("/record", "start or stop voice input"),
    ("/send", "send the current input"),
    ("/speak", "read a message aloud: /speak [number]"),
    ("/logout", "forget your profile"),
    ("/help", "list commands"),
    ("/quit", "exit"),
];

/// Fields accepted by `/set`.
pub const SET_FIELDS: &[&str] = &["name", "grade", "subject", "style", "notifications", "sound"];

/// Completes commands, `/go` paths and `/set` fields with their values.
#[derive(Clone)]
pub struct CliHelper {
    commands: Vec<String>,
    routes: Vec<String>,
    grades: Vec<String>,
    styles: Vec<String>,
}

impl CliHelper {
    pub fn new() -> Self {
        let routes = [
            Route::Welcome,
            Route::Profile,
            Route::Dashboard,
            Route::Subjects,
            Route::Progress,
            Route::Settings,
        ];
        Self {
            commands: COMMANDS.iter().map(|(cmd, _)| cmd.to_string()).collect(),
            routes: routes.iter().map(Route::to_string).collect(),
            grades: Grade::iter().map(|g| g.to_string()).collect(),
            styles: LearningStyle::iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Returns where the word under the cursor starts and what can replace it.
    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let Some(rest) = line.strip_prefix('/') else {
            return (0, Vec::new());
        };
        let word_start = line.rfind(' ').map_or(0, |i| i + 1);
        let word = &line[word_start..];

        let words: Vec<&str> = rest.split(' ').collect();
        let pool: Vec<&str> = match words.as_slice() {
            [_] => self.commands.iter().map(String::as_str).collect(),
            ["go", _] => self.routes.iter().map(String::as_str).collect(),
            ["set", _] => SET_FIELDS.to_vec(),
            ["set", "grade", _] => self.grades.iter().map(String::as_str).collect(),
            ["set", "style", _] => self.styles.iter().map(String::as_str).collect(),
            ["set", "notifications" | "sound", _] => vec!["on", "off"],
            _ => Vec::new(),
        };

        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(word))
            .map(str::to_string)
            .collect();
        (word_start, matches)
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|candidate| Pair {
                display: candidate.clone(),
                replacement: candidate,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        match line.split_once(' ') {
            Some((command, rest)) if line.starts_with('/') => {
                Owned(format!("{} {}", command.bright_cyan(), rest))
            }
            None if line.starts_with('/') => Owned(line.bright_cyan().to_string()),
            _ => Borrowed(line),
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let (start, matches) = self.candidates(line);
        let typed = line.len() - start;
        matches
            .into_iter()
            .find(|candidate| candidate.len() > typed)
            .map(|candidate| candidate[typed..].to_string())
    }
}

impl Validator for CliHelper {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completes_command_names() {
        let helper = CliHelper::new();
        let (start, matches) = helper.candidates("/s");
        assert_eq!(start, 0);
        assert_eq!(matches, vec!["/subjects", "/settings", "/set", "/send", "/speak"]);
        assert!(helper.candidates("hello").1.is_empty());
    }

    #[test]
    fn test_completes_go_paths() {
        let helper = CliHelper::new();
        let (start, matches) = helper.candidates("/go /s");
        assert_eq!(start, 4);
        assert_eq!(matches, vec!["/subjects", "/settings"]);
        assert_eq!(helper.candidates("/go ").1.len(), 6);
    }

    #[test]
    fn test_completes_set_fields_and_values() {
        let helper = CliHelper::new();
        assert_eq!(helper.candidates("/set no").1, vec!["notifications"]);
        assert_eq!(helper.candidates("/set sound o").1, vec!["on", "off"]);
        assert_eq!(
            helper.candidates("/set grade ").1,
            Grade::iter().map(|g| g.to_string()).collect::<Vec<_>>()
        );
        assert!(helper.candidates("/set name A").1.is_empty());
        assert!(helper.candidates("/hint extra").1.is_empty());
    }
}
