//! Repository trait for document assignments.

use async_trait::async_trait;

use crate::domain::entities::{Asignacion, AsignacionValores, EntidadDocFlags, TipoAsignacion};
use crate::error::AppError;

/// Repository interface for recurso and entidad document assignments.
///
/// `tipo` selects the holder kind; [`TipoAsignacion::Universal`] is not a
/// valid assignment kind and is rejected with [`AppError::Internal`].
/// Entidad flags are ignored for recurso assignments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AsignacionRepository: Send + Sync {
    /// Assignments of one holder ordered by documentacion codigo.
    async fn list(&self, tipo: TipoAsignacion, titular_id: i64)
    -> Result<Vec<Asignacion>, AppError>;

    async fn find_by_id(&self, tipo: TipoAsignacion, id: i64)
    -> Result<Option<Asignacion>, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the holder already has the documentacion.
    async fn create(
        &self,
        tipo: TipoAsignacion,
        titular_id: i64,
        documentacion_id: i64,
        valores: AsignacionValores,
        flags: EntidadDocFlags,
    ) -> Result<Asignacion, AppError>;

    async fn update(
        &self,
        tipo: TipoAsignacion,
        id: i64,
        valores: AsignacionValores,
        flags: EntidadDocFlags,
    ) -> Result<Asignacion, AppError>;

    async fn delete(&self, tipo: TipoAsignacion, id: i64) -> Result<bool, AppError>;
}
