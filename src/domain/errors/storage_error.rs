//! Durable storage error types.

use thiserror::Error;

/// Key-value storage error variants.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be opened.
    #[error("failed to access storage: {0}")]
    AccessFailed(String),

    /// Read failed.
    #[error("failed to read value: {0}")]
    ReadFailed(String),

    /// Write failed.
    #[error("failed to write value: {0}")]
    WriteFailed(String),

    /// Delete failed.
    #[error("failed to delete value: {0}")]
    DeleteFailed(String),

    /// Backend not compiled in or not present on this system.
    #[error("storage backend not available: {0}")]
    NotAvailable(String),
}
