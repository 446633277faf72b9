//! Student profile domain module.
//!
//! # Module Structure
//!
//! - `model`: `StudentProfile`, grade bands and field-level changes
//! - `repository`: Repository trait for profile persistence
//!
//! # Usage
//!
//! ```ignore
//! use studybuddy_core::profile::{Grade, StudentProfile, ProfileRepository};
//! ```

mod model;
mod repository;

// Re-export public API
pub use model::{Grade, GradeLevel, LearningStyle, ProfileChange, StudentProfile};
pub use repository::{InMemoryProfileRepository, ProfileRepository, PROFILE_KEY};
