//! Application layer for StudyBuddy.
//!
//! Routes, page content and the use cases behind the profile and settings
//! forms. The chat session itself lives in `studybuddy_core::chat`.

pub mod navigation;
pub mod pages;
pub mod profile_form;
pub mod settings;

pub use navigation::{NAV_ITEMS, NavItem, Navigator, Route};
pub use profile_form::{ProfileForm, ProfileFormUseCase};
pub use settings::{SettingsUseCase, SettingsView};
