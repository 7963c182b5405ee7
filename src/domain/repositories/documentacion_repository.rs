//! Repository trait for document types.

use async_trait::async_trait;

use super::ListQuery;
use crate::domain::entities::{Documentacion, DocumentacionValores};
use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentacionRepository: Send + Sync {
    /// Lists document types ordered by codigo. Search covers codigo and descripcion.
    async fn list(&self, query: ListQuery) -> Result<Vec<Documentacion>, AppError>;

    async fn count(&self, search: Option<String>) -> Result<i64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Documentacion>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the codigo is taken.
    async fn create(
        &self,
        valores: DocumentacionValores,
        created_by: Option<i64>,
    ) -> Result<Documentacion, AppError>;

    /// Overwrites every writable column.
    async fn update(
        &self,
        id: i64,
        valores: DocumentacionValores,
    ) -> Result<Documentacion, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// True when the document type is assigned to any recurso or entidad.
    async fn is_assigned(&self, id: i64) -> Result<bool, AppError>;
}
