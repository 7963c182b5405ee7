//! Repository trait for estados.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::ListQuery;
use crate::domain::entities::{Estado, NewEstado, UpdateEstado};
use crate::error::AppError;

/// Repository interface for status labels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EstadoRepository: Send + Sync {
    /// Lists estados ordered by nivel then nombre.
    async fn list(&self, query: ListQuery) -> Result<Vec<Estado>, AppError>;

    async fn count(&self, search: Option<String>) -> Result<i64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Estado>, AppError>;

    async fn find_by_nombre(&self, nombre: &str) -> Result<Option<Estado>, AppError>;

    async fn create(&self, nuevo: NewEstado) -> Result<Estado, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the estado does not exist.
    async fn update(&self, id: i64, cambios: UpdateEstado) -> Result<Estado, AppError>;

    /// Returns `Ok(false)` if nothing was deleted.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// True when any documentacion, recurso or assignment points at the estado.
    async fn is_referenced(&self, id: i64) -> Result<bool, AppError>;

    /// Estados of every assignment of a recurso, one entry per assignment.
    async fn list_for_recurso(&self, recurso_id: i64) -> Result<Vec<Estado>, AppError>;

    /// Estados of an entidad's own assignments and of the assignments of the
    /// recursos linked to it and active on `today`.
    async fn list_for_entidad(
        &self,
        entidad_id: i64,
        today: NaiveDate,
    ) -> Result<Vec<Estado>, AppError>;
}
