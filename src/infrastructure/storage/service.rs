//! File storage trait and error types.

use std::pin::Pin;

use async_trait::async_trait;
use thiserror::Error;
use tokio::io::AsyncRead;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("stored file not found: {0}")]
    NotFound(String),
    #[error("invalid stored file name: {0}")]
    InvalidName(String),
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Reader over a stored file's bytes.
pub type StoredFile = Pin<Box<dyn AsyncRead + Send>>;

/// Trait for storing attachment bytes under generated names.
///
/// Names are flat (no directories); implementations must reject anything
/// that could escape their root.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::LocalFileStorage`] - Files on local disk
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Writes `bytes` under `nombre`, failing if the name is already used.
    async fn save(&self, nombre: &str, bytes: &[u8]) -> StorageResult<()>;

    /// Opens a stored file for streaming.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotFound`] if nothing is stored under `nombre`.
    async fn open(&self, nombre: &str) -> StorageResult<StoredFile>;

    /// Removes a stored file. Removing a missing file is not an error.
    async fn delete(&self, nombre: &str) -> StorageResult<()>;

    /// Checks that the backend is usable. Reported by `/health`.
    async fn health_check(&self) -> bool;
}
