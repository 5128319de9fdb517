//! Stub keyring store for builds without keyring support.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::errors::StorageError;
use crate::domain::ports::KeyValueStore;

/// Stub store used when the keyring feature is disabled.
pub struct KeyringStore;

impl KeyringStore {
    /// Creates new stub store.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Creates store with a custom service name (no-op in stub).
    #[must_use]
    pub fn with_service(_service: impl Into<String>) -> Self {
        Self
    }
}

impl Default for KeyringStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for KeyringStore {
    async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        debug!("Keyring feature disabled - nothing stored");
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::NotAvailable(
            "built without keyring support".to_string(),
        ))
    }

    async fn delete(&self, _key: &str) -> Result<(), StorageError> {
        debug!("Keyring feature disabled - nothing to delete");
        Ok(())
    }
}
