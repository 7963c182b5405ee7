//! Local-disk file storage.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use super::service::{FileStorage, StorageError, StorageResult, StoredFile};

/// Stores files flat under a root directory.
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    /// Creates the root directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory cannot be created.
    pub async fn init(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).await?;
        info!("✓ Upload directory ready at {}", root.display());
        Ok(Self { root })
    }

    fn path_for(&self, nombre: &str) -> StorageResult<PathBuf> {
        if !is_safe_name(nombre) {
            warn!(nombre, "Rejected stored file name");
            return Err(StorageError::InvalidName(nombre.to_string()));
        }
        Ok(self.root.join(nombre))
    }
}

/// Flat names of `[A-Za-z0-9._-]` that do not start with a dot.
fn is_safe_name(nombre: &str) -> bool {
    !nombre.is_empty()
        && nombre.len() <= 255
        && !nombre.starts_with('.')
        && nombre
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, nombre: &str, bytes: &[u8]) -> StorageResult<()> {
        let path = self.path_for(nombre)?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await?;
        file.write_all(bytes).await?;
        file.flush().await?;

        debug!(nombre, size = bytes.len(), "Stored file");
        Ok(())
    }

    async fn open(&self, nombre: &str) -> StorageResult<StoredFile> {
        let path = self.path_for(nombre)?;

        match fs::File::open(&path).await {
            Ok(file) => {
                let file: StoredFile = Box::pin(file);
                Ok(file)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(nombre.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, nombre: &str) -> StorageResult<()> {
        let path = self.path_for(nombre)?;

        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(nombre, "File already absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Creates and removes a marker file under the root.
    async fn health_check(&self) -> bool {
        let marker = self.root.join(".health");
        if let Err(e) = fs::write(&marker, b"ok").await {
            warn!(error = %e, "Upload directory is not writable");
            return false;
        }
        fs::remove_file(&marker).await.is_ok()
    }
}
