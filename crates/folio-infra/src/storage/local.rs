//! Local filesystem implementation of the `FileStore` port.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use folio_core::ports::{FileKind, FileStore, StorageError};

/// Stores uploads under a single root directory with deterministic names of
/// the form `{kind}_{owner_id}_{original_name}`. Paths returned and accepted
/// by this store are relative to the root, so rows stay valid if the root
/// moves.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Strip path separators and oddball characters from a client-supplied
    /// file name. Only the final path component survives.
    fn sanitize(original_name: &str) -> Result<String, StorageError> {
        let base = original_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(original_name);

        let safe: String = base
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if safe.trim_matches(['.', '_']).is_empty() {
            return Err(StorageError::InvalidName(original_name.to_string()));
        }

        Ok(safe)
    }

    fn absolute(&self, stored: &str) -> PathBuf {
        self.root.join(stored)
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn save(
        &self,
        kind: FileKind,
        owner_id: Uuid,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, StorageError> {
        let safe = Self::sanitize(original_name)?;
        let stored = format!("{}_{}_{}", kind.as_str(), owner_id, safe);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;
        tokio::fs::write(self.absolute(&stored), bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        tracing::debug!(file = %stored, size = bytes.len(), "Stored upload");

        Ok(stored)
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        match tokio::fs::remove_file(self.absolute(path)).await {
            Ok(()) => Ok(()),
            // Already gone is fine; delete must be idempotent.
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(file = %path, "File already absent on delete");
                Ok(())
            }
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_uses_deterministic_name_and_writes_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let owner = Uuid::new_v4();

        let stored = store
            .save(FileKind::Cv, owner, "resume.pdf", b"pdf-bytes")
            .await
            .unwrap();

        assert_eq!(stored, format!("cv_{owner}_resume.pdf"));
        let on_disk = std::fs::read(dir.path().join(&stored)).unwrap();
        assert_eq!(on_disk, b"pdf-bytes");
    }

    #[tokio::test]
    async fn save_strips_directories_from_client_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let owner = Uuid::new_v4();

        let stored = store
            .save(FileKind::Image, owner, "../../etc/passwd", b"x")
            .await
            .unwrap();

        assert_eq!(stored, format!("image_{owner}_passwd"));
        assert!(dir.path().join(&stored).exists());
    }

    #[tokio::test]
    async fn unusable_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());

        let result = store.save(FileKind::Cv, Uuid::new_v4(), "..", b"x").await;

        assert!(matches!(result.unwrap_err(), StorageError::InvalidName(_)));
    }

    #[tokio::test]
    async fn delete_removes_file_and_tolerates_missing() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let owner = Uuid::new_v4();

        let stored = store
            .save(FileKind::Cv, owner, "resume.pdf", b"x")
            .await
            .unwrap();
        store.delete(&stored).await.unwrap();
        assert!(!dir.path().join(&stored).exists());

        // Second delete of the same path is still Ok.
        store.delete(&stored).await.unwrap();
    }

    #[tokio::test]
    async fn same_name_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let owner = Uuid::new_v4();

        store
            .save(FileKind::Cv, owner, "resume.pdf", b"old")
            .await
            .unwrap();
        let stored = store
            .save(FileKind::Cv, owner, "resume.pdf", b"new")
            .await
            .unwrap();

        assert_eq!(std::fs::read(dir.path().join(&stored)).unwrap(), b"new");
    }
}
