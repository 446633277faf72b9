//! Profile creation use case.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use studybuddy_core::Result;
use studybuddy_core::profile::{Grade, LearningStyle, ProfileRepository, StudentProfile};

use crate::navigation::Route;

/// Raw values entered on the profile page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub grade: Option<Grade>,
    pub favorite_subject: Option<String>,
    pub learning_style: Option<LearningStyle>,
}

/// Validates the form, persists the profile and routes to the dashboard.
#[derive(Clone)]
pub struct ProfileFormUseCase {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfileFormUseCase {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Submits the form, stamping `createdAt` with the current time.
    ///
    /// # Errors
    ///
    /// A blank name or missing grade yields a validation error and nothing
    /// is stored.
    pub async fn submit(&self, form: ProfileForm) -> Result<(StudentProfile, Route)> {
        self.submit_at(form, Utc::now()).await
    }

    pub async fn submit_at(
        &self,
        form: ProfileForm,
        now: DateTime<Utc>,
    ) -> Result<(StudentProfile, Route)> {
        let profile = StudentProfile::new(
            form.name,
            form.grade,
            form.favorite_subject,
            form.learning_style,
        )?
        .created(now);

        self.profiles.save(&profile).await?;
        tracing::info!(
            "[ProfileForm] Created profile for {} (grade {})",
            profile.name,
            profile.grade
        );

        Ok((profile, Route::Dashboard))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use studybuddy_core::StudyBuddyError;
    use studybuddy_core::profile::InMemoryProfileRepository;

    #[tokio::test]
    async fn test_submit_saves_and_routes_to_dashboard() {
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let use_case = ProfileFormUseCase::new(profiles.clone());
        let now = Utc.with_ymd_and_hms(2024, 9, 1, 8, 30, 0).unwrap();

        let form = ProfileForm {
            name: "  Maya ".to_string(),
            grade: Some(Grade::Elementary2),
            favorite_subject: Some("Science".to_string()),
            learning_style: Some(LearningStyle::Kinesthetic),
        };
        let (profile, route) = use_case.submit_at(form, now).await.unwrap();

        assert_eq!(route, Route::Dashboard);
        assert_eq!(profile.name, "Maya");
        assert_eq!(profile.created_at, Some(now));
        assert_eq!(profiles.load().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_missing_grade_is_rejected_without_saving() {
        let profiles = Arc::new(InMemoryProfileRepository::new());
        let use_case = ProfileFormUseCase::new(profiles.clone());

        let err = use_case
            .submit(ProfileForm {
                name: "Maya".to_string(),
                ..ProfileForm::default()
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            StudyBuddyError::validation("Please fill in your name and grade")
        );
        assert!(profiles.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_blank_name_is_rejected() {
        let use_case = ProfileFormUseCase::new(Arc::new(InMemoryProfileRepository::new()));
        let result = use_case
            .submit(ProfileForm {
                name: "   ".to_string(),
                grade: Some(Grade::College),
                ..ProfileForm::default()
            })
            .await;
        assert!(result.is_err());
    }
}
