//! Configuration service implementation.
//!
//! Loads `config.toml`, writing the defaults on first run, and caches the
//! result so pages and the chat controller read it without file I/O.

use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use studybuddy_core::config::{AppConfig, Preferences};
use studybuddy_core::{Result, StudyBuddyError};

use crate::storage::{AtomicFile, FileFormat};

/// Configuration service that loads and caches the application configuration.
#[derive(Clone)]
pub struct ConfigService {
    file: Arc<AtomicFile<AppConfig>>,
    cached: Arc<RwLock<Option<AppConfig>>>,
}

impl ConfigService {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: Arc::new(AtomicFile::new(path, FileFormat::Toml)),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it from disk on first access.
    ///
    /// A missing file is created with the defaults.
    pub fn load_or_init(&self) -> Result<AppConfig> {
        if let Some(cached) = self.read_cache()? {
            return Ok(cached);
        }

        let config = match self.file.load()? {
            Some(config) => config,
            None => {
                let config = AppConfig::default();
                self.file.save(&config)?;
                tracing::info!(
                    "[ConfigService] Wrote default config to {}",
                    self.file.path().display()
                );
                config
            }
        };

        self.write_cache(Some(config.clone()))?;
        Ok(config)
    }

    /// Persists `config` and refreshes the cache.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        self.file.save(config)?;
        self.write_cache(Some(config.clone()))
    }

    /// Replaces only the `[preferences]` table.
    pub fn save_preferences(&self, preferences: Preferences) -> Result<AppConfig> {
        self.file.update(AppConfig::default(), |config| {
            config.preferences = preferences;
            Ok(())
        })?;
        self.invalidate_cache()?;
        self.load_or_init()
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) -> Result<()> {
        self.write_cache(None)
    }

    fn read_cache(&self) -> Result<Option<AppConfig>> {
        self.cached
            .read()
            .map(|guard| guard.clone())
            .map_err(|_| StudyBuddyError::internal("config cache lock poisoned"))
    }

    fn write_cache(&self, value: Option<AppConfig>) -> Result<()> {
        let mut guard = self
            .cached
            .write()
            .map_err(|_| StudyBuddyError::internal("config cache lock poisoned"))?;
        *guard = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_first_load_writes_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        let service = ConfigService::new(path.clone());

        let config = service.load_or_init().unwrap();

        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[chat]\nreply_latency_ms = 250\n").unwrap();

        let config = ConfigService::new(path).load_or_init().unwrap();

        assert_eq!(config.chat.reply_latency_ms, 250);
        assert_eq!(config.chat.hint_latency_ms, 800);
        assert!(config.preferences.notifications);
    }

    #[test]
    fn test_save_preferences_keeps_other_tables() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[voice]\nnarrator_command = [\"espeak\"]\n").unwrap();
        let service = ConfigService::new(path.clone());
        service.load_or_init().unwrap();

        let updated = service
            .save_preferences(Preferences {
                notifications: false,
                sound_effects: true,
            })
            .unwrap();

        assert!(!updated.preferences.notifications);
        assert_eq!(updated.voice.narrator_command, vec!["espeak".to_string()]);

        let reread = ConfigService::new(path).load_or_init().unwrap();
        assert_eq!(reread, updated);
    }
}
