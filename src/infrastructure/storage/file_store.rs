//! TOML-file-backed key-value store.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStore;

/// Stores values in a single TOML table, rewritten atomically on every change.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Creates store backed by `path`. The file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::ReadFailed(e.to_string())),
        };

        match toml::from_str(&content) {
            Ok(values) => Ok(values),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Session file is malformed, ignoring it");
                Ok(BTreeMap::new())
            }
        }
    }

    fn persist(path: &Path, values: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let content =
            toml::to_string(values).map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        let parent = path
            .parent()
            .ok_or_else(|| StorageError::AccessFailed("invalid session file path".into()))?;
        std::fs::create_dir_all(parent).map_err(|e| StorageError::AccessFailed(e.to_string()))?;

        let mut temp_file = tempfile::NamedTempFile::new_in(parent)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        temp_file
            .write_all(content.as_bytes())
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        temp_file
            .persist(path)
            .map_err(|e| StorageError::WriteFailed(e.error.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        values.insert(key.to_string(), value.to_string());
        Self::persist(&self.path, &values)?;
        debug!(path = %self.path.display(), key, "Value written");
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut values = self.load().await?;
        if values.remove(key).is_none() {
            return Ok(());
        }
        Self::persist(&self.path, &values)?;
        debug!(path = %self.path.display(), key, "Value deleted");
        Ok(())
    }
}
