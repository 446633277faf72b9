//! Static page content.
//!
//! Pages are plain data; the binary decides how to draw them.

pub mod not_found;
pub mod progress;
pub mod subjects;
pub mod welcome;

pub use not_found::NotFoundPage;
pub use progress::{Achievement, ProgressPage, SkillBar, SubjectProgress, WeeklyActivity};
pub use subjects::Subject;
pub use welcome::{CallToAction, Feature, WelcomePage};
