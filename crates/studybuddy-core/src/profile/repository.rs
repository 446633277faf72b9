//! Profile repository trait.
//!
//! Defines the interface for reading and writing the single stored
//! `StudentProfile`.

use super::model::StudentProfile;
use crate::error::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Key under which the profile is stored.
pub const PROFILE_KEY: &str = "studentProfile";

/// An abstract repository for the student profile.
///
/// There is at most one profile per installation. Saving always replaces the
/// whole value.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads the stored profile.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(profile))`: Profile found
    /// - `Ok(None)`: No profile stored yet
    /// - `Err(_)`: Storage could not be read or decoded
    async fn load(&self) -> Result<Option<StudentProfile>>;

    /// Replaces the stored profile.
    async fn save(&self, profile: &StudentProfile) -> Result<()>;

    /// Removes the stored profile. Succeeds when nothing was stored.
    async fn clear(&self) -> Result<()>;
}

/// Volatile repository, used by tests and by `--ephemeral` runs.
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profile: RwLock<Option<StudentProfile>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: StudentProfile) -> Self {
        Self {
            profile: RwLock::new(Some(profile)),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn load(&self) -> Result<Option<StudentProfile>> {
        Ok(self.profile.read().await.clone())
    }

    async fn save(&self, profile: &StudentProfile) -> Result<()> {
        *self.profile.write().await = Some(profile.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.profile.write().await.take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Grade;

    #[tokio::test]
    async fn test_in_memory_round_trip_and_clear() {
        let repo = InMemoryProfileRepository::new();
        assert!(repo.load().await.unwrap().is_none());

        let profile = StudentProfile::new("Mia", Some(Grade::Elementary2), None, None).unwrap();
        repo.save(&profile).await.unwrap();
        assert_eq!(repo.load().await.unwrap(), Some(profile));

        repo.clear().await.unwrap();
        assert!(repo.load().await.unwrap().is_none());
        // Clearing twice is fine
        repo.clear().await.unwrap();
    }
}
