//! Repository trait for expiration-related queries.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::entities::{
    DocumentoVencible, EstadoConteo, TipoAsignacion, Totales, VencimientoFilter, VencimientoItem,
};
use crate::error::AppError;

/// Cross-table queries used by the expiration job, the dashboard and reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VencimientoRepository: Send + Sync {
    /// Every recurso assignment, entidad assignment and universal
    /// documentacion, with or without an expiration date. Recursos dados de
    /// baja and deleted entidades are skipped.
    async fn list_vencibles(&self) -> Result<Vec<DocumentoVencible>, AppError>;

    /// Sets the estado of one document. `tipo` picks the table.
    async fn update_estado(
        &self,
        tipo: TipoAsignacion,
        id: i64,
        estado_id: i64,
    ) -> Result<(), AppError>;

    /// Documents with an expiration date inside the filter, soonest first.
    ///
    /// With `entidad_id`, only that entidad's assignments and those of the
    /// recursos linked to it on `today` are returned; universal documents are
    /// left out.
    async fn find_vencimientos(
        &self,
        filter: VencimientoFilter,
        today: NaiveDate,
    ) -> Result<Vec<VencimientoItem>, AppError>;

    /// Assignments grouped by estado, highest nivel first.
    async fn estado_distribution(&self) -> Result<Vec<EstadoConteo>, AppError>;

    async fn totales(&self) -> Result<Totales, AppError>;
}
