//! String key-value store persisted as one JSON object.
//!
//! Mirrors browser local storage: values are opaque strings, usually JSON
//! documents themselves.

use std::collections::BTreeMap;
use std::path::PathBuf;

use studybuddy_core::Result;

use super::atomic_file::{AtomicFile, FileFormat};

type Entries = BTreeMap<String, String>;

pub struct KeyValueStore {
    file: AtomicFile<Entries>,
}

impl KeyValueStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicFile::new(path, FileFormat::Json),
        }
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.file.load()?.and_then(|mut entries| entries.remove(key)))
    }

    pub fn set(&self, key: &str, value: String) -> Result<()> {
        self.file.update(Entries::new(), |entries| {
            entries.insert(key.to_string(), value);
            Ok(())
        })
    }

    /// Removes `key`. Missing keys are not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        if !self.file.path().exists() {
            return Ok(());
        }
        self.file.update(Entries::new(), |entries| {
            entries.remove(key);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_get_remove() {
        let temp_dir = TempDir::new().unwrap();
        let store = KeyValueStore::new(temp_dir.path().join("storage.json"));

        assert_eq!(store.get("a").unwrap(), None);
        store.set("a", "1".to_string()).unwrap();
        store.set("b", "2".to_string()).unwrap();
        assert_eq!(store.get("a").unwrap().as_deref(), Some("1"));

        store.remove("a").unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_remove_without_file_does_not_create_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("storage.json");
        let store = KeyValueStore::new(path.clone());
        store.remove("missing").unwrap();
        assert!(!path.exists());
    }
}
