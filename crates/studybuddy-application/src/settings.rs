//! Settings page use case: profile edits and preference toggles.

use std::sync::Arc;

use studybuddy_core::chat::Notification;
use studybuddy_core::config::Preferences;
use studybuddy_core::profile::{ProfileChange, ProfileRepository, StudentProfile};
use studybuddy_core::{Result, StudyBuddyError};
use studybuddy_infrastructure::ConfigService;

/// Current values shown on the settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsView {
    pub profile: StudentProfile,
    pub preferences: Preferences,
}

pub struct SettingsUseCase {
    profiles: Arc<dyn ProfileRepository>,
    config: ConfigService,
}

impl SettingsUseCase {
    pub fn new(profiles: Arc<dyn ProfileRepository>, config: ConfigService) -> Self {
        Self { profiles, config }
    }

    pub async fn view(&self) -> Result<SettingsView> {
        Ok(SettingsView {
            profile: self.stored_profile().await?,
            preferences: self.config.load_or_init()?.preferences,
        })
    }

    /// Applies `changes` in order and overwrites the stored profile.
    ///
    /// Nothing is written if any change is rejected.
    pub async fn update_profile(
        &self,
        changes: Vec<ProfileChange>,
    ) -> Result<(StudentProfile, Notification)> {
        let mut profile = self.stored_profile().await?;
        for change in changes {
            profile = profile.with_change(change)?;
        }

        self.profiles.save(&profile).await?;
        tracing::info!("[Settings] Profile updated for {}", profile.name);

        Ok((
            profile,
            Notification::success(
                "Profile updated",
                "Your profile has been successfully updated.",
            ),
        ))
    }

    pub fn save_preferences(&self, preferences: Preferences) -> Result<Notification> {
        self.config.save_preferences(preferences)?;
        tracing::info!("[Settings] Preferences saved");
        Ok(Notification::success(
            "Preferences saved",
            "Your preferences have been successfully updated.",
        ))
    }

    async fn stored_profile(&self) -> Result<StudentProfile> {
        self.profiles
            .load()
            .await?
            .ok_or(StudyBuddyError::MissingProfile)
    }
}
