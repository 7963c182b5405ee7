//! Repository trait for attachment metadata.

use async_trait::async_trait;

use crate::domain::entities::{ArchivoOwner, DocumentoArchivo, NewDocumentoArchivo};
use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ArchivoRepository: Send + Sync {
    async fn create(&self, nuevo: NewDocumentoArchivo) -> Result<DocumentoArchivo, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<DocumentoArchivo>, AppError>;

    /// Attachments of one owner, newest first.
    async fn list_by_owner(&self, owner: ArchivoOwner)
    -> Result<Vec<DocumentoArchivo>, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// True when the document the owner id points at exists.
    async fn owner_exists(&self, owner: ArchivoOwner) -> Result<bool, AppError>;
}
