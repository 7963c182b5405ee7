//! Dashboard aggregates.

use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::Serialize;
use serde_json::json;

use crate::domain::entities::{EstadoConteo, TipoAsignacion, Totales, VencimientoFilter, VencimientoItem};
use crate::domain::repositories::VencimientoRepository;
use crate::domain::vencimiento::{DocumentStatus, compute_status, dias_restantes, status_on};
use crate::error::AppError;

/// Assignment counts per computed status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConteoStatus {
    pub vigentes: i64,
    pub por_vencer: i64,
    pub vencidos: i64,
    pub sin_fecha: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resumen {
    #[serde(flatten)]
    pub totales: Totales,
    pub documentos: ConteoStatus,
    pub fecha: NaiveDate,
}

/// A document with an expiration date and its status on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VencimientoDetalle {
    #[serde(flatten)]
    pub item: VencimientoItem,
    pub dias_restantes: i64,
    pub status: DocumentStatus,
}

impl VencimientoDetalle {
    pub fn new(item: VencimientoItem, today: NaiveDate) -> Self {
        let status = status_on(item.fecha_vencimiento, item.dias_anticipacion, today);
        let dias_restantes = dias_restantes(item.fecha_vencimiento, today);

        Self {
            item,
            dias_restantes,
            status,
        }
    }
}

pub struct DashboardService {
    vencimientos: Arc<dyn VencimientoRepository>,
}

impl DashboardService {
    pub fn new(vencimientos: Arc<dyn VencimientoRepository>) -> Self {
        Self { vencimientos }
    }

    /// Headline totals plus recurso and entidad assignments counted by
    /// their status on `today`.
    pub async fn resumen(&self, today: NaiveDate) -> Result<Resumen, AppError> {
        let (totales, documentos) = tokio::try_join!(
            self.vencimientos.totales(),
            self.vencimientos.list_vencibles()
        )?;

        let mut conteo = ConteoStatus::default();
        for doc in documentos
            .iter()
            .filter(|d| d.tipo != TipoAsignacion::Universal)
        {
            match compute_status(doc.fecha_vencimiento, doc.dias_anticipacion, today) {
                Some(DocumentStatus::Vigente) => conteo.vigentes += 1,
                Some(DocumentStatus::PorVencer) => conteo.por_vencer += 1,
                Some(DocumentStatus::Vencido) => conteo.vencidos += 1,
                None => conteo.sin_fecha += 1,
            }
        }

        Ok(Resumen {
            totales,
            documentos: conteo,
            fecha: today,
        })
    }

    pub async fn estados(&self) -> Result<Vec<EstadoConteo>, AppError> {
        self.vencimientos.estado_distribution().await
    }

    /// Documents expiring within `dias` days of `today`, soonest first.
    /// Already expired documents are included when `incluir_vencidos`.
    pub async fn vencimientos(
        &self,
        dias: u32,
        incluir_vencidos: bool,
        today: NaiveDate,
    ) -> Result<Vec<VencimientoDetalle>, AppError> {
        let hasta = today
            .checked_add_days(Days::new(u64::from(dias)))
            .ok_or_else(|| AppError::bad_request("dias is out of range", json!({ "dias": dias })))?;

        let filter = VencimientoFilter {
            desde: (!incluir_vencidos).then_some(today),
            hasta: Some(hasta),
            entidad_id: None,
        };

        let items = self.vencimientos.find_vencimientos(filter, today).await?;
        Ok(items
            .into_iter()
            .map(|item| VencimientoDetalle::new(item, today))
            .collect())
    }
}
