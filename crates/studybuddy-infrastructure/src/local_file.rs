//! Metadata lookup for files the student attaches.

use std::path::Path;

use studybuddy_core::attachment::LocalFile;
use studybuddy_core::{Result, StudyBuddyError};

/// Reads size and guesses the MIME type of `path` without opening it.
pub async fn inspect_local_file(path: &Path) -> Result<LocalFile> {
    let metadata = tokio::fs::metadata(path).await.map_err(|e| {
        StudyBuddyError::io(format!("Cannot read {}: {}", path.display(), e))
    })?;

    if !metadata.is_file() {
        return Err(StudyBuddyError::validation(format!(
            "{} is not a file",
            path.display()
        )));
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| StudyBuddyError::validation("Path has no file name"))?;

    let mime_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(LocalFile {
        path: path.to_path_buf(),
        file_name,
        size_bytes: metadata.len(),
        mime_type,
    })
}
