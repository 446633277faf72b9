//! StudentProfile domain model.
//!
//! Represents the single student using this installation: display name,
//! grade band and optional learning preferences.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{Result, StudyBuddyError};

/// Schooling stage selected by the student.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Grade {
    Preschool,
    Kindergarten,
    Elementary1,
    Elementary2,
    Middle,
    HighSchool,
    College,
}

impl Grade {
    /// Coarse bucket used to pick reply templates.
    pub fn level(self) -> GradeLevel {
        match self {
            Grade::Preschool | Grade::Kindergarten | Grade::Elementary1 | Grade::Elementary2 => {
                GradeLevel::Elementary
            }
            Grade::Middle => GradeLevel::Middle,
            Grade::HighSchool => GradeLevel::High,
            Grade::College => GradeLevel::College,
        }
    }

    /// Short band shown next to the student's name.
    pub fn label(self) -> String {
        match self {
            Grade::Elementary1 => "1-2".to_string(),
            Grade::Elementary2 => "3-5".to_string(),
            Grade::Middle => "6-8".to_string(),
            Grade::HighSchool => "9-12".to_string(),
            Grade::College => "College".to_string(),
            other => other.to_string(),
        }
    }
}

/// Derived grade bucket. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum GradeLevel {
    Elementary,
    Middle,
    High,
    College,
}

/// How the student says they learn best.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LearningStyle {
    Visual,
    Auditory,
    Reading,
    Kinesthetic,
    Mixed,
}

/// Student profile domain model.
///
/// Stored as camelCase JSON under a single key of the profile store.
/// Treat it as an immutable value: edits go through [`ProfileChange`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    pub name: String,
    pub grade: Grade,
    #[serde(
        default,
        deserialize_with = "empty_string_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub favorite_subject: Option<String>,
    #[serde(
        default,
        deserialize_with = "empty_style_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub learning_style: Option<LearningStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A single field-level edit produced by the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileChange {
    Name(String),
    Grade(Grade),
    FavoriteSubject(Option<String>),
    LearningStyle(Option<LearningStyle>),
}

impl StudentProfile {
    /// Builds a validated profile.
    ///
    /// # Errors
    ///
    /// Returns `StudyBuddyError::Validation` when the name is blank or the
    /// grade is missing.
    pub fn new(
        name: impl Into<String>,
        grade: Option<Grade>,
        favorite_subject: Option<String>,
        learning_style: Option<LearningStyle>,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        let grade = match grade {
            Some(grade) if !name.is_empty() => grade,
            _ => return Err(missing_information()),
        };

        Ok(Self {
            name,
            grade,
            favorite_subject: favorite_subject
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            learning_style,
            created_at: None,
        })
    }

    /// Returns a copy stamped with the given creation time.
    pub fn created(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    pub fn grade_level(&self) -> GradeLevel {
        self.grade.level()
    }

    /// Produces a new profile with one field replaced.
    ///
    /// # Errors
    ///
    /// Renaming to a blank name is rejected the same way the profile form
    /// rejects it.
    pub fn with_change(&self, change: ProfileChange) -> Result<Self> {
        let mut next = self.clone();
        match change {
            ProfileChange::Name(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(missing_information());
                }
                next.name = name;
            }
            ProfileChange::Grade(grade) => next.grade = grade,
            ProfileChange::FavoriteSubject(subject) => {
                next.favorite_subject = subject
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty());
            }
            ProfileChange::LearningStyle(style) => next.learning_style = style,
        }
        Ok(next)
    }

    /// First letter of the name, upper-cased, for the avatar badge.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().next().unwrap_or(c))
            .unwrap_or('A')
    }
}

fn missing_information() -> StudyBuddyError {
    StudyBuddyError::validation("Please fill in your name and grade")
}

fn empty_string_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn empty_style_as_none<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<LearningStyle>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse::<LearningStyle>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn alice() -> StudentProfile {
        StudentProfile::new("Alice", Some(Grade::Middle), None, None).unwrap()
    }

    #[test]
    fn test_every_grade_maps_to_exactly_one_level() {
        for grade in Grade::iter() {
            let first = grade.level();
            assert_eq!(first, grade.level());
        }
        assert_eq!(Grade::Preschool.level(), GradeLevel::Elementary);
        assert_eq!(Grade::Kindergarten.level(), GradeLevel::Elementary);
        assert_eq!(Grade::Elementary1.level(), GradeLevel::Elementary);
        assert_eq!(Grade::Elementary2.level(), GradeLevel::Elementary);
        assert_eq!(Grade::Middle.level(), GradeLevel::Middle);
        assert_eq!(Grade::HighSchool.level(), GradeLevel::High);
        assert_eq!(Grade::College.level(), GradeLevel::College);
    }

    #[test]
    fn test_grade_parses_case_insensitively() {
        assert_eq!("HighSchool".parse::<Grade>().unwrap(), Grade::HighSchool);
        assert_eq!("elementary2".parse::<Grade>().unwrap(), Grade::Elementary2);
        assert!("sophomore".parse::<Grade>().is_err());
    }

    #[test]
    fn test_grade_labels() {
        assert_eq!(Grade::Elementary1.label(), "1-2");
        assert_eq!(Grade::HighSchool.label(), "9-12");
        assert_eq!(Grade::Kindergarten.label(), "kindergarten");
    }

    #[test]
    fn test_new_requires_name_and_grade() {
        assert!(StudentProfile::new("  ", Some(Grade::College), None, None).is_err());
        let err = StudentProfile::new("Bob", None, None, None).unwrap_err();
        assert_eq!(
            err,
            StudyBuddyError::validation("Please fill in your name and grade")
        );
    }

    #[test]
    fn test_json_uses_browser_field_names() {
        let profile = StudentProfile::new(
            "Alice",
            Some(Grade::HighSchool),
            Some("Math".to_string()),
            Some(LearningStyle::Visual),
        )
        .unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["grade"], "highschool");
        assert_eq!(json["favoriteSubject"], "Math");
        assert_eq!(json["learningStyle"], "visual");
    }

    #[test]
    fn test_empty_optional_fields_read_as_absent() {
        let raw = r#"{"name":"Kai","grade":"kindergarten","favoriteSubject":"","learningStyle":""}"#;
        let profile: StudentProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.favorite_subject, None);
        assert_eq!(profile.learning_style, None);
    }

    #[test]
    fn test_with_change_leaves_original_untouched() {
        let original = alice();
        let updated = original
            .with_change(ProfileChange::Grade(Grade::College))
            .unwrap();
        assert_eq!(original.grade, Grade::Middle);
        assert_eq!(updated.grade, Grade::College);
        assert_eq!(updated.name, "Alice");
    }

    #[test]
    fn test_with_change_rejects_blank_name() {
        assert!(alice()
            .with_change(ProfileChange::Name(" ".to_string()))
            .is_err());
    }

    #[test]
    fn test_initial() {
        assert_eq!(alice().initial(), 'A');
        let lower = StudentProfile::new("zoe", Some(Grade::College), None, None).unwrap();
        assert_eq!(lower.initial(), 'Z');
    }
}
