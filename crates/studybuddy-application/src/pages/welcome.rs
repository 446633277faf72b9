use studybuddy_core::profile::StudentProfile;

use crate::navigation::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: [Feature; 3] = [
    Feature {
        title: "Personalized Learning",
        description: "Get help tailored to your grade level and learning style",
    },
    Feature {
        title: "Hint-Based Guidance",
        description: "Receive helpful hints rather than just answers",
    },
    Feature {
        title: "Progress Tracking",
        description: "Keep track of your learning journey and improvements",
    },
];

pub const TAGLINE: &str =
    "Your intelligent companion for homework help that guides rather than just gives answers.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallToAction {
    pub label: &'static str,
    pub target: Route,
}

/// The landing page, personalized when a profile exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomePage {
    pub heading: String,
    pub tagline: &'static str,
    pub features: &'static [Feature],
    pub call_to_action: CallToAction,
}

impl WelcomePage {
    pub fn for_profile(profile: Option<&StudentProfile>) -> Self {
        let (heading, call_to_action) = match profile {
            Some(profile) => (
                format!("Welcome, {}!", profile.name),
                CallToAction {
                    label: "Continue Learning",
                    target: Route::Dashboard,
                },
            ),
            None => (
                "AI Homework Assistant".to_string(),
                CallToAction {
                    label: "Get Started",
                    target: Route::Profile,
                },
            ),
        };

        Self {
            heading,
            tagline: TAGLINE,
            features: &FEATURES,
            call_to_action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use studybuddy_core::profile::Grade;

    #[test]
    fn test_first_visit_points_to_profile() {
        let page = WelcomePage::for_profile(None);
        assert_eq!(page.heading, "AI Homework Assistant");
        assert_eq!(page.call_to_action.label, "Get Started");
        assert_eq!(page.call_to_action.target, Route::Profile);
        assert_eq!(page.features.len(), 3);
    }

    #[test]
    fn test_returning_student_is_greeted() {
        let profile = StudentProfile::new("Ines", Some(Grade::College), None, None).unwrap();
        let page = WelcomePage::for_profile(Some(&profile));
        assert_eq!(page.heading, "Welcome, Ines!");
        assert_eq!(page.call_to_action.target, Route::Dashboard);
    }
}
