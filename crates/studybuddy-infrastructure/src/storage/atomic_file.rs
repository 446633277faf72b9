//! Atomic file operations for small JSON/TOML documents.
//!
//! Provides a thin layer for safe access to the config and key-value files.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use studybuddy_core::StudyBuddyError;

/// On-disk encoding of an [`AtomicFile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    fn decode<T: DeserializeOwned>(self, content: &str) -> Result<T, StudyBuddyError> {
        match self {
            FileFormat::Json => Ok(serde_json::from_str(content)?),
            FileFormat::Toml => Ok(toml::from_str(content)?),
        }
    }

    fn encode<T: Serialize>(self, data: &T) -> Result<String, StudyBuddyError> {
        match self {
            FileFormat::Json => Ok(serde_json::to_string_pretty(data)?),
            FileFormat::Toml => Ok(toml::to_string_pretty(data)?),
        }
    }
}

/// A handle to a document that is only ever replaced as a whole.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Isolation**: File locking serializes read-modify-write updates
/// - **Durability**: Explicit fsync before rename
pub struct AtomicFile<T> {
    path: PathBuf,
    format: FileFormat,
    _phantom: PhantomData<T>,
}

impl<T> AtomicFile<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(path: PathBuf, format: FileFormat) -> Self {
        Self {
            path,
            format,
            _phantom: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and decodes the file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and decoded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, StudyBuddyError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        self.format.decode(&content).map(Some)
    }

    /// Saves data to the file atomically.
    pub fn save(&self, data: &T) -> Result<(), StudyBuddyError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let encoded = self.format.encode(data)?;

        // Write to temporary file in the same directory
        let tmp_path = self.temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(encoded.as_bytes())?;
        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a locked read-modify-write.
    ///
    /// `f` receives the current value (or `default_value` if the file is
    /// missing). Its result is written back only when it returns `Ok`.
    pub fn update<F>(&self, default_value: T, f: F) -> Result<(), StudyBuddyError>
    where
        F: FnOnce(&mut T) -> Result<(), StudyBuddyError>,
    {
        let _lock = FileLock::acquire(&self.path)?;

        let mut data = self.load()?.unwrap_or(default_value);
        f(&mut data)?;
        self.save(&data)
    }

    fn temp_path(&self) -> Result<PathBuf, StudyBuddyError> {
        let parent = self
            .path
            .parent()
            .ok_or_else(|| StudyBuddyError::io("Path has no parent directory"))?;

        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| StudyBuddyError::io("Path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }
}

/// A file lock guard that automatically releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, StudyBuddyError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| StudyBuddyError::io(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Best effort; the OS lock goes away with the handle
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_load_missing_and_empty_files() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");
        let file: AtomicFile<Counter> = AtomicFile::new(path.clone(), FileFormat::Json);
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_save_creates_parent_and_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("counter.toml");
        let file = AtomicFile::new(path.clone(), FileFormat::Toml);

        file.save(&Counter { value: 3 }).unwrap();

        assert_eq!(file.load().unwrap(), Some(Counter { value: 3 }));
        assert!(!temp_dir.path().join("nested").join(".counter.toml.tmp").exists());
    }

    #[test]
    fn test_update_applies_closure_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("counter.json"), FileFormat::Json);

        file.update(Counter::default(), |c| {
            c.value += 1;
            Ok(())
        })
        .unwrap();
        file.update(Counter::default(), |c| {
            c.value += 1;
            Ok(())
        })
        .unwrap();

        assert_eq!(file.load().unwrap(), Some(Counter { value: 2 }));
    }

    #[test]
    fn test_failed_update_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicFile::new(temp_dir.path().join("counter.json"), FileFormat::Json);
        file.save(&Counter { value: 1 }).unwrap();

        let result = file.update(Counter::default(), |c| {
            c.value = 99;
            Err(StudyBuddyError::internal("abort"))
        });

        assert!(result.is_err());
        assert_eq!(file.load().unwrap(), Some(Counter { value: 1 }));
    }

    #[test]
    fn test_corrupt_json_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("counter.json");
        fs::write(&path, "{not json").unwrap();
        let file: AtomicFile<Counter> = AtomicFile::new(path, FileFormat::Json);
        assert!(file.load().unwrap_err().is_serialization());
    }
}
