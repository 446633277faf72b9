//! File attachments for student messages.
//!
//! A selected file is only referenced locally for preview. Nothing is read
//! beyond its metadata and nothing is uploaded.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, StudyBuddyError};

/// Default attachment size limit: 5 MiB.
pub const DEFAULT_MAX_ATTACHMENT_BYTES: u64 = 5 * 1024 * 1024;

/// A file picked by the student, described by its metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

/// Session-scoped reference to an accepted file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub id: Uuid,
    pub file_name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Local-only preview reference, valid for the current session.
    pub preview_url: String,
}

impl AttachmentRef {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// Validates selected files against the size limit.
#[derive(Debug, Clone, Copy)]
pub struct AttachmentHandler {
    max_bytes: u64,
}

impl Default for AttachmentHandler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTACHMENT_BYTES)
    }
}

impl AttachmentHandler {
    pub fn new(max_bytes: u64) -> Self {
        Self { max_bytes }
    }

    pub fn max_bytes(&self) -> u64 {
        self.max_bytes
    }

    /// Accepts `file` if it fits the limit and mints a preview reference.
    ///
    /// # Errors
    ///
    /// `StudyBuddyError::AttachmentTooLarge` when the file is bigger than the
    /// limit. A file of exactly the limit is accepted.
    pub fn accept(&self, file: LocalFile) -> Result<AttachmentRef> {
        if file.size_bytes > self.max_bytes {
            return Err(StudyBuddyError::AttachmentTooLarge {
                size: file.size_bytes,
                limit: self.max_bytes,
            });
        }

        let id = Uuid::new_v4();
        Ok(AttachmentRef {
            id,
            preview_url: format!("local://attachments/{}/{}", id, file.file_name),
            file_name: file.file_name,
            size_bytes: file.size_bytes,
            mime_type: file.mime_type,
        })
    }
}
