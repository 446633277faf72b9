//! Progress page.
//!
//! All figures are fixed sample data; nothing is derived from chat history.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectProgress {
    pub name: &'static str,
    pub value: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeeklyActivity {
    pub day: &'static str,
    pub sessions: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillBar {
    pub label: &'static str,
    pub percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressPage {
    pub subject_progress: &'static [SubjectProgress],
    pub weekly_activity: &'static [WeeklyActivity],
    pub overall: &'static [SkillBar],
    pub achievements: &'static [Achievement],
}

const SUBJECT_PROGRESS: [SubjectProgress; 4] = [
    SubjectProgress { name: "Math", value: 85 },
    SubjectProgress { name: "Science", value: 70 },
    SubjectProgress { name: "Language", value: 90 },
    SubjectProgress { name: "History", value: 65 },
];

const WEEKLY_ACTIVITY: [WeeklyActivity; 7] = [
    WeeklyActivity { day: "Mon", sessions: 2 },
    WeeklyActivity { day: "Tue", sessions: 3 },
    WeeklyActivity { day: "Wed", sessions: 1 },
    WeeklyActivity { day: "Thu", sessions: 4 },
    WeeklyActivity { day: "Fri", sessions: 2 },
    WeeklyActivity { day: "Sat", sessions: 5 },
    WeeklyActivity { day: "Sun", sessions: 3 },
];

const OVERALL: [SkillBar; 4] = [
    SkillBar { label: "Math Skills", percent: 85 },
    SkillBar { label: "Science Concepts", percent: 70 },
    SkillBar { label: "Language Arts", percent: 90 },
    SkillBar { label: "History & Social Studies", percent: 65 },
];

const ACHIEVEMENTS: [Achievement; 3] = [
    Achievement {
        title: "5-Day Streak",
        description: "You've been learning for 5 days in a row!",
    },
    Achievement {
        title: "10 Math Problems Solved",
        description: "You're becoming a math expert!",
    },
    Achievement {
        title: "3 Science Concepts Mastered",
        description: "Your understanding of science is growing!",
    },
];

impl ProgressPage {
    pub fn sample() -> Self {
        Self {
            subject_progress: &SUBJECT_PROGRESS,
            weekly_activity: &WEEKLY_ACTIVITY,
            overall: &OVERALL,
            achievements: &ACHIEVEMENTS,
        }
    }

    /// Share of each subject in the subject chart, rounded to whole percent.
    pub fn subject_shares(&self) -> Vec<(&'static str, u32)> {
        let total: u32 = self.subject_progress.iter().map(|s| u32::from(s.value)).sum();
        if total == 0 {
            return self.subject_progress.iter().map(|s| (s.name, 0)).collect();
        }
        self.subject_progress
            .iter()
            .map(|s| {
                let share = (f64::from(s.value) * 100.0 / f64::from(total)).round() as u32;
                (s.name, share)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data() {
        let page = ProgressPage::sample();
        assert_eq!(page.subject_progress[0], SubjectProgress { name: "Math", value: 85 });
        assert_eq!(page.weekly_activity.len(), 7);
        assert_eq!(page.weekly_activity[5], WeeklyActivity { day: "Sat", sessions: 5 });
        assert_eq!(page.achievements.len(), 3);
    }

    #[test]
    fn test_subject_shares() {
        // 85 + 70 + 90 + 65 = 310
        let shares = ProgressPage::sample().subject_shares();
        assert_eq!(
            shares,
            vec![("Math", 27), ("Science", 23), ("Language", 29), ("History", 21)]
        );
    }
}
