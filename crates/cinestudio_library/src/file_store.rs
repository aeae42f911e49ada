//! Filesystem-backed key-value store.
//!
//! Stores one JSON document per key as `{base_path}/{key}.json`, written
//! atomically via a temp file and rename.

use crate::KeyValueStore;
use cinestudio_error::{LibraryError, LibraryErrorKind, StudioResult};
use std::path::PathBuf;

/// Filesystem store backend.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new filesystem store rooted at `base_path`.
    ///
    /// Creates the directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> StudioResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            LibraryError::new(LibraryErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Opened library store");
        Ok(Self { base_path })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_path.join(format!("{key}.json"))
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileStore {
    #[tracing::instrument(skip(self))]
    async fn get(&self, key: &str) -> StudioResult<Option<String>> {
        let path = self.path_for(key);

        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LibraryError::new(LibraryErrorKind::NamespaceRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    #[tracing::instrument(skip(self, value), fields(bytes = value.len()))]
    async fn set(&self, key: &str, value: &str) -> StudioResult<()> {
        let path = self.path_for(key);

        // Write to temp file first, then rename for atomicity
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, value).await.map_err(|e| {
            LibraryError::new(LibraryErrorKind::NamespaceWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            LibraryError::new(LibraryErrorKind::NamespaceWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(key = key, path = %path.display(), "Wrote namespace document");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, key: &str) -> StudioResult<()> {
        let path = self.path_for(key);

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(key = key, "Removed namespace document");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LibraryError::new(LibraryErrorKind::NamespaceWrite(format!(
                "delete {}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}
