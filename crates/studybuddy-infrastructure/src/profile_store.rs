//! File-backed profile repository.
//!
//! The profile lives as a JSON string under [`PROFILE_KEY`] in
//! `storage.json`. Unreadable entries are treated as absent so a damaged
//! store sends the student back through the profile form instead of
//! failing startup.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use studybuddy_core::profile::{PROFILE_KEY, ProfileRepository, StudentProfile};
use studybuddy_core::{Result, StudyBuddyError};

use crate::storage::KeyValueStore;

/// A [`ProfileRepository`] persisted in the local key-value store.
#[derive(Clone)]
pub struct JsonProfileRepository {
    store: Arc<KeyValueStore>,
}

impl JsonProfileRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            store: Arc::new(KeyValueStore::new(path)),
        }
    }

    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&KeyValueStore) -> Result<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| StudyBuddyError::internal(format!("storage task failed: {}", e)))?
    }
}

#[async_trait]
impl ProfileRepository for JsonProfileRepository {
    async fn load(&self) -> Result<Option<StudentProfile>> {
        let raw = self.blocking(|store| store.get(PROFILE_KEY)).await?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        match serde_json::from_str::<StudentProfile>(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                tracing::warn!("[ProfileStore] Ignoring unreadable profile: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, profile: &StudentProfile) -> Result<()> {
        let encoded = serde_json::to_string(profile)?;
        self.blocking(move |store| store.set(PROFILE_KEY, encoded))
            .await?;
        tracing::debug!("[ProfileStore] Saved profile for {}", profile.name);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.blocking(|store| store.remove(PROFILE_KEY)).await?;
        tracing::debug!("[ProfileStore] Cleared profile");
        Ok(())
    }
}
