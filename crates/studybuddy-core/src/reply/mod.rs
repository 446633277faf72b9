//! Templated reply generation.
//!
//! Maps a student message to one of a fixed set of grade-aware templates.
//! Keyword matching is a case-insensitive substring test and the first
//! matching rule wins:
//!
//! 1. loop guard on recent assistant prompts
//! 2. exercise / practice / activity requests
//! 3. counting lessons
//! 4. grade-gated subject keywords
//! 5. a random generic prompt
//!
//! The only randomness is the fallback, drawn from the caller's RNG.

mod templates;

use once_cell::sync::Lazy;
use rand::Rng;
use rand::seq::SliceRandom;
use regex::Regex;

use crate::chat::ChatMessage;
use crate::profile::{GradeLevel, StudentProfile};

pub use templates::{hint, welcome};

/// How many trailing history entries the loop guard inspects.
const LOOP_GUARD_WINDOW: usize = 4;

/// The number of apples shown by the apple-counting prompt.
const EXPECTED_APPLE_COUNT: u64 = 3;

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid regex"));

/// Produces the assistant's reply to `message`.
///
/// `history` is the conversation before `message` was appended.
pub fn generate<R>(
    message: &str,
    profile: &StudentProfile,
    history: &[ChatMessage],
    rng: &mut R,
) -> String
where
    R: Rng + ?Sized,
{
    let name = profile.name.as_str();
    let text = message.to_lowercase();

    if repeats_generic_prompt(history) {
        return templates::redirect(name);
    }

    if let Some(reply) = exercise_reply(&text, name) {
        return reply;
    }

    if text.contains("learn") && contains_any(&text, &["number", "count"]) {
        return templates::counting_lesson(name);
    }

    if let Some(reply) = grade_reply(profile.grade_level(), &text, history, name) {
        return reply;
    }

    let prompts = templates::generic_prompts(name);
    prompts
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| prompts[0].clone())
}

fn repeats_generic_prompt(history: &[ChatMessage]) -> bool {
    let start = history.len().saturating_sub(LOOP_GUARD_WINDOW);
    history[start..].iter().any(|m| {
        m.is_assistant()
            && templates::LOOP_PHRASES
                .iter()
                .any(|phrase| m.content.contains(phrase))
    })
}

fn exercise_reply(text: &str, name: &str) -> Option<String> {
    if !contains_any(text, &["exercise", "practice", "activity"]) {
        return None;
    }

    let reply = if contains_any(text, &["number", "count"]) {
        if contains_any(text, &["1 to 5", "1-5"]) {
            templates::numbers_one_to_five_exercise(name)
        } else {
            templates::numbers_one_to_ten_exercise(name)
        }
    } else if contains_any(text, &["math", "addition", "subtraction"]) {
        templates::math_exercise(name)
    } else {
        templates::generic_exercise(name)
    };
    Some(reply)
}

fn grade_reply(
    level: GradeLevel,
    text: &str,
    history: &[ChatMessage],
    name: &str,
) -> Option<String> {
    match level {
        GradeLevel::Elementary => {
            if text.contains("count") {
                Some(templates::apple_counting(name))
            } else if text.contains("apple") {
                // TODO: compare against the count actually shown once prompts carry their own answers
                if apple_answer(text, history) == Some(EXPECTED_APPLE_COUNT) {
                    Some(templates::apple_correct(name))
                } else {
                    Some(templates::apple_try_again(name))
                }
            } else if contains_any(text, &["add", "plus"]) {
                Some(templates::addition_groups(name))
            } else {
                None
            }
        }
        GradeLevel::Middle => {
            if text.contains("fraction") {
                Some(templates::fractions(name))
            } else if text.contains("equation") {
                Some(templates::equations(name))
            } else {
                None
            }
        }
        GradeLevel::High => {
            if text.contains("quadratic") {
                Some(templates::quadratics(name))
            } else if text.contains("derivative") {
                Some(templates::derivatives(name))
            } else {
                None
            }
        }
        GradeLevel::College => {
            if text.contains("calculus") {
                Some(templates::calculus(name))
            } else if text.contains("physics") {
                Some(templates::physics(name))
            } else {
                None
            }
        }
    }
}

/// First integer in the current message, else in the latest student message.
fn apple_answer(text: &str, history: &[ChatMessage]) -> Option<u64> {
    first_number(text).or_else(|| {
        history
            .iter()
            .rev()
            .find(|m| m.is_student())
            .and_then(|m| first_number(&m.content))
    })
}

fn first_number(text: &str) -> Option<u64> {
    FIRST_NUMBER
        .find(text)
        .and_then(|m| m.as_str().parse::<u64>().ok())
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}
