//! Expiration state recomputation.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use crate::config::EstadoNames;
use crate::domain::repositories::{EstadoRepository, VencimientoRepository};
use crate::domain::vencimiento::{DocumentStatus, compute_status};
use crate::error::AppError;

/// Outcome of one recomputation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecalculoResumen {
    pub evaluados: u64,
    pub actualizados: u64,
    pub fecha: NaiveDate,
}

/// Maps computed document statuses to Estado rows and applies them.
///
/// The three estados the job assigns are looked up by name
/// ([`EstadoNames`]). An expired document whose documentacion defines an
/// `estado_vencimiento_id` gets that estado instead of the Vencido one.
pub struct VencimientoService {
    vencimientos: Arc<dyn VencimientoRepository>,
    estados: Arc<dyn EstadoRepository>,
    nombres: EstadoNames,
}

impl VencimientoService {
    pub fn new(
        vencimientos: Arc<dyn VencimientoRepository>,
        estados: Arc<dyn EstadoRepository>,
        nombres: EstadoNames,
    ) -> Self {
        Self {
            vencimientos,
            estados,
            nombres,
        }
    }

    fn nombre_para(&self, status: DocumentStatus) -> &str {
        match status {
            DocumentStatus::Vigente => &self.nombres.vigente,
            DocumentStatus::PorVencer => &self.nombres.por_vencer,
            DocumentStatus::Vencido => &self.nombres.vencido,
        }
    }

    /// Resolves the configured estado for a status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] naming the estado if it does not exist.
    pub async fn estado_id_para(&self, status: DocumentStatus) -> Result<i64, AppError> {
        let nombre = self.nombre_para(status);

        self.estados
            .find_by_nombre(nombre)
            .await?
            .map(|e| e.id)
            .ok_or_else(|| {
                AppError::internal(
                    "Configured estado does not exist",
                    json!({ "estado": nombre, "status": status.as_str() }),
                )
            })
    }

    /// The estado a document should have on `today`, or `None` when it has
    /// no expiration date.
    pub async fn estado_para(
        &self,
        fecha_vencimiento: Option<NaiveDate>,
        dias_anticipacion: i32,
        estado_vencimiento_id: Option<i64>,
        today: NaiveDate,
    ) -> Result<Option<i64>, AppError> {
        let Some(status) = compute_status(fecha_vencimiento, dias_anticipacion, today) else {
            return Ok(None);
        };

        match (status, estado_vencimiento_id) {
            (DocumentStatus::Vencido, Some(id)) => Ok(Some(id)),
            _ => self.estado_id_para(status).await.map(Some),
        }
    }

    /// Recomputes the estado of every document with an expiration date and
    /// updates the ones that changed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if a configured estado is missing or
    /// on database errors. Updates applied before a failure are kept.
    pub async fn recalcular(&self, today: NaiveDate) -> Result<RecalculoResumen, AppError> {
        let vigente = self.estado_id_para(DocumentStatus::Vigente).await?;
        let por_vencer = self.estado_id_para(DocumentStatus::PorVencer).await?;
        let vencido = self.estado_id_para(DocumentStatus::Vencido).await?;

        let documentos = self.vencimientos.list_vencibles().await?;

        let mut evaluados = 0u64;
        let mut actualizados = 0u64;

        for doc in documentos {
            let Some(status) = compute_status(doc.fecha_vencimiento, doc.dias_anticipacion, today)
            else {
                continue;
            };
            evaluados += 1;

            let destino = match status {
                DocumentStatus::Vigente => vigente,
                DocumentStatus::PorVencer => por_vencer,
                DocumentStatus::Vencido => doc.estado_vencimiento_id.unwrap_or(vencido),
            };

            if doc.estado_id != Some(destino) {
                debug!(
                    tipo = doc.tipo.as_str(),
                    id = doc.id,
                    estado_id = destino,
                    "Updating document estado"
                );
                self.vencimientos
                    .update_estado(doc.tipo, doc.id, destino)
                    .await?;
                actualizados += 1;
            }
        }

        metrics::counter!("axioma_vencimientos_actualizados_total").increment(actualizados);
        info!(evaluados, actualizados, fecha = %today, "Expiration states recomputed");

        Ok(RecalculoResumen {
            evaluados,
            actualizados,
            fecha: today,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{DocumentoVencible, Estado, TipoAsignacion};
    use crate::domain::repositories::{MockEstadoRepository, MockVencimientoRepository};
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn estado(id: i64, nombre: &str) -> Estado {
        Estado {
            id,
            nombre: nombre.to_string(),
            descripcion: None,
            color: "#000000".to_string(),
            nivel: id as i32,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn estados_mock() -> MockEstadoRepository {
        let mut mock = MockEstadoRepository::new();
        mock.expect_find_by_nombre().returning(|nombre| {
            Ok(match nombre {
                "Vigente" => Some(estado(1, "Vigente")),
                "Por vencer" => Some(estado(5, "Por vencer")),
                "Vencido" => Some(estado(8, "Vencido")),
                _ => None,
            })
        });
        mock
    }

    fn vencible(
        tipo: TipoAsignacion,
        id: i64,
        fv: Option<NaiveDate>,
        estado_id: Option<i64>,
        estado_vencimiento_id: Option<i64>,
    ) -> DocumentoVencible {
        DocumentoVencible {
            tipo,
            id,
            fecha_vencimiento: fv,
            dias_anticipacion: 30,
            estado_id,
            estado_vencimiento_id,
        }
    }

    #[tokio::test]
    async fn test_recalcular_updates_only_changed_rows() {
        let today = d(2025, 6, 1);
        let mut venc = MockVencimientoRepository::new();

        venc.expect_list_vencibles().times(1).returning(move || {
            Ok(vec![
                // already vigente
                vencible(TipoAsignacion::Recurso, 1, Some(d(2026, 1, 1)), Some(1), None),
                // becomes por vencer
                vencible(TipoAsignacion::Entidad, 2, Some(d(2025, 6, 20)), Some(1), None),
                // expired with a custom estado
                vencible(TipoAsignacion::Universal, 3, Some(d(2025, 5, 1)), Some(1), Some(9)),
                // no date
                vencible(TipoAsignacion::Recurso, 4, None, None, None),
            ])
        });
        venc.expect_update_estado()
            .withf(|tipo, id, estado_id| {
                (*tipo == TipoAsignacion::Entidad && *id == 2 && *estado_id == 5)
                    || (*tipo == TipoAsignacion::Universal && *id == 3 && *estado_id == 9)
            })
            .times(2)
            .returning(|_, _, _| Ok(()));

        let service =
            VencimientoService::new(Arc::new(venc), Arc::new(estados_mock()), EstadoNames::default());

        let resumen = service.recalcular(today).await.unwrap();

        assert_eq!(resumen.evaluados, 3);
        assert_eq!(resumen.actualizados, 2);
        assert_eq!(resumen.fecha, today);
    }

    #[tokio::test]
    async fn test_recalcular_missing_estado_is_internal_error() {
        let mut estados = MockEstadoRepository::new();
        estados.expect_find_by_nombre().returning(|_| Ok(None));
        let mut venc = MockVencimientoRepository::new();
        venc.expect_list_vencibles().never();

        let service =
            VencimientoService::new(Arc::new(venc), Arc::new(estados), EstadoNames::default());

        let err = service.recalcular(d(2025, 6, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_error_info().details["estado"], "Vigente");
    }

    #[tokio::test]
    async fn test_estado_para() {
        let service = VencimientoService::new(
            Arc::new(MockVencimientoRepository::new()),
            Arc::new(estados_mock()),
            EstadoNames::default(),
        );
        let today = d(2025, 6, 1);

        assert_eq!(service.estado_para(None, 10, None, today).await.unwrap(), None);
        assert_eq!(
            service
                .estado_para(Some(d(2025, 5, 1)), 10, None, today)
                .await
                .unwrap(),
            Some(8)
        );
        assert_eq!(
            service
                .estado_para(Some(d(2025, 5, 1)), 10, Some(42), today)
                .await
                .unwrap(),
            Some(42)
        );
    }
}
