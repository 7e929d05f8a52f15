//! File storage port for uploaded attachments.

use async_trait::async_trait;
use uuid::Uuid;

/// Kinds of files a portfolio can attach. The kind prefixes the stored name
/// so uploads from one owner cannot collide across fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Cv,
    Image,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Cv => "cv",
            FileKind::Image => "image",
        }
    }
}

/// Storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

/// Store for uploaded file content, addressed by the path it returns.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Write uploaded bytes under a deterministic name derived from kind,
    /// owner and original file name. Returns the stored path to persist.
    async fn save(
        &self,
        kind: FileKind,
        owner_id: Uuid,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError>;

    /// Remove a stored file. Deleting a file that is already gone is not an
    /// error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}
