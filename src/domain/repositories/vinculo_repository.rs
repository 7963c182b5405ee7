//! Repository trait for entidad ↔ recurso links.

use async_trait::async_trait;

use crate::domain::entities::{Vinculo, VinculoValores};
use crate::error::AppError;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VinculoRepository: Send + Sync {
    /// Links of an entidad ordered by recurso apellido, nombre.
    async fn list_by_entidad(&self, entidad_id: i64) -> Result<Vec<Vinculo>, AppError>;

    /// Links of a recurso to non-deleted entidades ordered by razon_social.
    async fn list_by_recurso(&self, recurso_id: i64) -> Result<Vec<Vinculo>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Vinculo>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the recurso is already linked.
    async fn create(
        &self,
        entidad_id: i64,
        recurso_id: i64,
        valores: VinculoValores,
    ) -> Result<Vinculo, AppError>;

    async fn update(&self, id: i64, valores: VinculoValores) -> Result<Vinculo, AppError>;

    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
