//! Repository trait for recursos.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::ListQuery;
use crate::domain::entities::{Recurso, RecursoValores};
use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecursoRepository: Send + Sync {
    /// Lists recursos ordered by apellido, nombre. Search covers codigo,
    /// apellido, nombre and cuil. Recursos dados de baja are skipped unless
    /// `incluir_bajas`.
    async fn list(&self, query: ListQuery, incluir_bajas: bool) -> Result<Vec<Recurso>, AppError>;

    async fn count(&self, search: Option<String>, incluir_bajas: bool) -> Result<i64, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Recurso>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the codigo or cuil is taken.
    async fn create(
        &self,
        valores: RecursoValores,
        created_by: Option<i64>,
    ) -> Result<Recurso, AppError>;

    async fn update(&self, id: i64, valores: RecursoValores) -> Result<Recurso, AppError>;

    /// Sets `fecha_baja` on a recurso that has none.
    ///
    /// Returns `Ok(false)` if the recurso does not exist or is already dado de baja.
    async fn dar_de_baja(&self, id: i64, fecha: NaiveDate) -> Result<bool, AppError>;
}
