//! Repository trait for entidades.

use async_trait::async_trait;

use super::ListQuery;
use crate::domain::entities::{Entidad, EntidadValores};
use crate::error::AppError;

/// Repository interface for organizations. Soft-deleted rows are invisible
/// to every method.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntidadRepository: Send + Sync {
    /// Lists entidades ordered by razon_social. Search covers razon_social,
    /// cuit and localidad.
    async fn list(&self, query: ListQuery) -> Result<Vec<Entidad>, AppError>;

    async fn count(&self, search: Option<String>) -> Result<i64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Entidad>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the razon_social or cuit is taken.
    async fn create(
        &self,
        valores: EntidadValores,
        created_by: Option<i64>,
    ) -> Result<Entidad, AppError>;

    async fn update(&self, id: i64, valores: EntidadValores) -> Result<Entidad, AppError>;

    /// Sets `deleted_at = now()`. Returns `Ok(false)` if not found or already deleted.
    async fn soft_delete(&self, id: i64) -> Result<bool, AppError>;
}
