//! A first visit through to logout, against the file-backed store.

use std::sync::Arc;

use studybuddy_application::pages::WelcomePage;
use studybuddy_application::{Navigator, ProfileForm, ProfileFormUseCase, Route};
use studybuddy_core::profile::{Grade, ProfileRepository};
use studybuddy_infrastructure::{JsonProfileRepository, StudyBuddyPaths};
use tempfile::TempDir;

#[tokio::test]
async fn test_first_visit_to_logout() {
    let temp_dir = TempDir::new().unwrap();
    let paths = StudyBuddyPaths::with_base(temp_dir.path());
    let profiles: Arc<dyn ProfileRepository> =
        Arc::new(JsonProfileRepository::new(paths.storage_file()));
    let navigator = Navigator::new(Arc::clone(&profiles));

    let page = WelcomePage::for_profile(profiles.load().await.unwrap().as_ref());
    assert_eq!(page.call_to_action.target, Route::Profile);
    assert_eq!(
        navigator.resolve(Route::parse("/dashboard")).await.unwrap(),
        Route::Profile
    );

    let (profile, next) = ProfileFormUseCase::new(Arc::clone(&profiles))
        .submit(ProfileForm {
            name: "Kai".to_string(),
            grade: Some(Grade::Kindergarten),
            ..ProfileForm::default()
        })
        .await
        .unwrap();
    assert!(profile.created_at.is_some());
    assert_eq!(navigator.resolve(next).await.unwrap(), Route::Dashboard);

    let page = WelcomePage::for_profile(profiles.load().await.unwrap().as_ref());
    assert_eq!(page.heading, "Welcome, Kai!");

    assert_eq!(navigator.logout().await.unwrap(), Route::Welcome);
    assert_eq!(
        navigator.resolve(Route::Progress).await.unwrap(),
        Route::Profile
    );
}
