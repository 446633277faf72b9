use strum::{Display, EnumIter, IntoEnumIterator};

/// The fixed subjects grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Subject {
    Mathematics,
    Science,
    #[strum(to_string = "Language Arts")]
    LanguageArts,
    #[strum(to_string = "Social Studies")]
    SocialStudies,
    Art,
    Music,
    #[strum(to_string = "Physical Education")]
    PhysicalEducation,
    Reading,
}

impl Subject {
    pub fn all() -> Vec<Subject> {
        Subject::iter().collect()
    }

    pub fn help_text(self) -> String {
        format!(
            "Get personalized help with your {} homework.",
            self.to_string().to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_subjects_in_display_order() {
        let all = Subject::all();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], Subject::Mathematics);
        assert_eq!(all[7], Subject::Reading);
    }

    #[test]
    fn test_help_text_lowercases_name() {
        assert_eq!(
            Subject::PhysicalEducation.help_text(),
            "Get personalized help with your physical education homework."
        );
    }
}
