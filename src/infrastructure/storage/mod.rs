//! Attachment storage.
//!
//! Provides a [`FileStorage`] trait with a local-disk implementation,
//! [`LocalFileStorage`], rooted at `UPLOAD_DIR`.

mod local_storage;
mod service;

pub use local_storage::LocalFileStorage;
#[cfg(test)]
pub use service::MockFileStorage;
pub use service::{FileStorage, StorageError, StorageResult, StoredFile};
