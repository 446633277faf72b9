//! Profile and configuration files sharing one base directory.

use studybuddy_core::config::Preferences;
use studybuddy_core::profile::{Grade, ProfileRepository, StudentProfile};
use studybuddy_infrastructure::{ConfigService, JsonProfileRepository, StudyBuddyPaths};
use tempfile::TempDir;

#[tokio::test]
async fn test_profile_survives_restart_next_to_config() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StudyBuddyPaths::with_base(temp_dir.path().join("studybuddy"));

    let config = ConfigService::new(paths.config_file());
    config.load_or_init().unwrap();
    config
        .save_preferences(Preferences {
            notifications: true,
            sound_effects: false,
        })
        .unwrap();

    let profile = StudentProfile::new("Noor", Some(Grade::Middle), None, None).unwrap();
    JsonProfileRepository::new(paths.storage_file())
        .save(&profile)
        .await
        .unwrap();

    // A fresh process sees both documents
    let reloaded = JsonProfileRepository::new(paths.storage_file())
        .load()
        .await
        .unwrap();
    assert_eq!(reloaded, Some(profile));

    let reloaded_config = ConfigService::new(paths.config_file()).load_or_init().unwrap();
    assert!(!reloaded_config.preferences.sound_effects);

    assert!(paths.config_file().exists());
    assert!(paths.storage_file().exists());
}

#[tokio::test]
async fn test_logout_then_load_is_empty() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StudyBuddyPaths::with_base(temp_dir.path());
    let repo = JsonProfileRepository::new(paths.storage_file());

    let profile = StudentProfile::new("Noor", Some(Grade::College), None, None).unwrap();
    repo.save(&profile).await.unwrap();
    repo.clear().await.unwrap();

    assert!(repo.load().await.unwrap().is_none());
}
