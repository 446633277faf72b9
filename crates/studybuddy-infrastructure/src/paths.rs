//! Unified path management for StudyBuddy files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/studybuddy/        # Base directory (or --data-dir / STUDYBUDDY_HOME)
//! ├── config.toml              # Application configuration
//! ├── storage.json             # Local key-value storage (student profile)
//! └── logs/                    # Application logs
//!     └── studybuddy.log.YYYY-MM-DD
//! ```

use std::path::{Path, PathBuf};

/// Environment variable overriding the base directory.
pub const HOME_ENV: &str = "STUDYBUDDY_HOME";

const APP_DIR_NAME: &str = "studybuddy";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Neither a config nor a home directory could be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Resolved locations of every file StudyBuddy touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyBuddyPaths {
    base: PathBuf,
}

impl StudyBuddyPaths {
    /// Uses `base` as the base directory.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Resolves the base directory.
    ///
    /// Precedence: explicit override, then `STUDYBUDDY_HOME`, then the
    /// platform config directory, then `~/.studybuddy`.
    pub fn resolve(override_dir: Option<PathBuf>) -> Result<Self, PathError> {
        if let Some(dir) = override_dir {
            return Ok(Self::with_base(dir));
        }
        if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_base(PathBuf::from(dir)));
        }
        if let Some(dir) = dirs::config_dir() {
            return Ok(Self::with_base(dir.join(APP_DIR_NAME)));
        }
        dirs::home_dir()
            .map(|home| Self::with_base(home.join(format!(".{}", APP_DIR_NAME))))
            .ok_or(PathError::HomeDirNotFound)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base
    }

    pub fn config_file(&self) -> PathBuf {
        self.base.join("config.toml")
    }

    pub fn storage_file(&self) -> PathBuf {
        self.base.join("storage.json")
    }

    pub fn logs_dir(&self) -> PathBuf {
        self.base.join("logs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let paths = StudyBuddyPaths::resolve(Some(PathBuf::from("/tmp/sb"))).unwrap();
        assert_eq!(paths.base_dir(), Path::new("/tmp/sb"));
        assert_eq!(paths.config_file(), PathBuf::from("/tmp/sb/config.toml"));
        assert_eq!(paths.storage_file(), PathBuf::from("/tmp/sb/storage.json"));
        assert_eq!(paths.logs_dir(), PathBuf::from("/tmp/sb/logs"));
    }
}
