//! Reports over expirations and entidades.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use super::asignacion_service::{AsignacionDetalle, AsignacionService};
use super::dashboard_service::VencimientoDetalle;
use crate::domain::entities::{Entidad, Estado, TipoAsignacion, VencimientoFilter, Vinculo};
use crate::domain::repositories::{EntidadRepository, VencimientoRepository, VinculoRepository};
use crate::error::AppError;

/// An active recurso of an entidad with its assignments.
#[derive(Debug, Clone, Serialize)]
pub struct RecursoReporte {
    pub vinculo: Vinculo,
    pub documentacion: Vec<AsignacionDetalle>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntidadReporte {
    pub entidad: Entidad,
    pub documentacion: Vec<AsignacionDetalle>,
    pub recursos: Vec<RecursoReporte>,
    pub estado_critico: Option<Estado>,
    pub fecha: NaiveDate,
}

pub struct ReporteService {
    vencimientos: Arc<dyn VencimientoRepository>,
    entidades: Arc<dyn EntidadRepository>,
    vinculos: Arc<dyn VinculoRepository>,
    asignaciones: Arc<AsignacionService>,
}

impl ReporteService {
    pub fn new(
        vencimientos: Arc<dyn VencimientoRepository>,
        entidades: Arc<dyn EntidadRepository>,
        vinculos: Arc<dyn VinculoRepository>,
        asignaciones: Arc<AsignacionService>,
    ) -> Self {
        Self {
            vencimientos,
            entidades,
            vinculos,
            asignaciones,
        }
    }

    /// Documents expiring inside `[desde, hasta]`.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `desde > hasta`
    /// - [`AppError::NotFound`] for an unknown `entidad_id`
    pub async fn vencimientos(
        &self,
        filter: VencimientoFilter,
        today: NaiveDate,
    ) -> Result<Vec<VencimientoDetalle>, AppError> {
        if let (Some(desde), Some(hasta)) = (filter.desde, filter.hasta) {
            if desde > hasta {
                return Err(AppError::bad_request(
                    "desde cannot be after hasta",
                    json!({ "desde": desde, "hasta": hasta }),
                ));
            }
        }

        if let Some(id) = filter.entidad_id {
            self.find_entidad(id).await?;
        }

        let items = self.vencimientos.find_vencimientos(filter, today).await?;
        Ok(items
            .into_iter()
            .map(|item| VencimientoDetalle::new(item, today))
            .collect())
    }

    /// An entidad with its own assignments, its active recursos and theirs,
    /// and the most critical estado among all of them.
    pub async fn entidad(&self, id: i64, today: NaiveDate) -> Result<EntidadReporte, AppError> {
        let entidad = self.find_entidad(id).await?;

        let (documentacion, vinculos, estado_critico) = tokio::try_join!(
            self.asignaciones.list(TipoAsignacion::Entidad, id, today),
            self.vinculos.list_by_entidad(id),
            self.asignaciones
                .estado_critico(TipoAsignacion::Entidad, id, today),
        )?;

        let mut recursos = Vec::new();
        for vinculo in vinculos.into_iter().filter(|v| v.recurso_vigente(today)) {
            let documentacion = self
                .asignaciones
                .list(TipoAsignacion::Recurso, vinculo.recurso_id, today)
                .await?;
            recursos.push(RecursoReporte {
                vinculo,
                documentacion,
            });
        }

        Ok(EntidadReporte {
            entidad,
            documentacion,
            recursos,
            estado_critico,
            fecha: today,
        })
    }

    async fn find_entidad(&self, id: i64) -> Result<Entidad, AppError> {
        self.entidades
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Entidad not found", json!({ "id": id })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::vencimiento_service::VencimientoService;
    use crate::config::EstadoNames;
    use crate::domain::repositories::{
        EstadoRepository, MockAsignacionRepository, MockDocumentacionRepository,
        MockEntidadRepository, MockEstadoRepository, MockRecursoRepository,
        MockVencimientoRepository, MockVinculoRepository,
    };
    use crate::test_support::{asignacion, d, entidad, estado, recurso, vinculo};

    fn asignaciones_service(
        asignaciones: MockAsignacionRepository,
        estados: MockEstadoRepository,
    ) -> Arc<AsignacionService> {
        let estados: Arc<dyn EstadoRepository> = Arc::new(estados);
        let mut recursos = MockRecursoRepository::new();
        recursos
            .expect_find_by_id()
            .returning(|id| Ok(Some(recurso(id))));
        let mut entidades = MockEntidadRepository::new();
        entidades
            .expect_find_by_id()
            .returning(|id| Ok(Some(entidad(id))));

        let vencimientos = Arc::new(VencimientoService::new(
            Arc::new(MockVencimientoRepository::new()),
            estados.clone(),
            EstadoNames::default(),
        ));

        Arc::new(AsignacionService::new(
            Arc::new(asignaciones),
            Arc::new(MockDocumentacionRepository::new()),
            Arc::new(recursos),
            Arc::new(entidades),
            estados,
            vencimientos,
        ))
    }

    #[tokio::test]
    async fn test_vencimientos_rejects_inverted_range() {
        let mut repo = MockVencimientoRepository::new();
        repo.expect_find_vencimientos().never();

        let service = ReporteService::new(
            Arc::new(repo),
            Arc::new(MockEntidadRepository::new()),
            Arc::new(MockVinculoRepository::new()),
            asignaciones_service(MockAsignacionRepository::new(), MockEstadoRepository::new()),
        );

        let filter = VencimientoFilter {
            desde: Some(d(2025, 2, 1)),
            hasta: Some(d(2025, 1, 1)),
            entidad_id: None,
        };

        let err = service.vencimientos(filter, d(2025, 1, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_vencimientos_unknown_entidad_is_not_found() {
        let mut entidades = MockEntidadRepository::new();
        entidades.expect_find_by_id().returning(|_| Ok(None));

        let service = ReporteService::new(
            Arc::new(MockVencimientoRepository::new()),
            Arc::new(entidades),
            Arc::new(MockVinculoRepository::new()),
            asignaciones_service(MockAsignacionRepository::new(), MockEstadoRepository::new()),
        );

        let filter = VencimientoFilter {
            entidad_id: Some(9),
            ..Default::default()
        };

        assert!(matches!(
            service.vencimientos(filter, d(2025, 1, 1)).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_entidad_report_skips_inactive_recursos() {
        let today = d(2025, 6, 1);

        let mut asignaciones = MockAsignacionRepository::new();
        asignaciones
            .expect_list()
            .returning(|tipo, titular| {
                let fv = match tipo {
                    TipoAsignacion::Entidad => d(2025, 6, 10),
                    _ => d(2026, 1, 1),
                };
                Ok(vec![asignacion(titular * 10, titular, Some(fv))])
            });

        let mut estados = MockEstadoRepository::new();
        estados
            .expect_list_for_entidad()
            .returning(|_, _| Ok(vec![estado(1, "Vigente", 1), estado(8, "Vencido", 8)]));

        let mut entidades = MockEntidadRepository::new();
        entidades
            .expect_find_by_id()
            .returning(|id| Ok(Some(entidad(id))));

        let mut vinculos = MockVinculoRepository::new();
        vinculos.expect_list_by_entidad().returning(|id| {
            let mut terminado = vinculo(2, id, 4);
            terminado.fecha_fin = Some(d(2025, 1, 31));
            Ok(vec![vinculo(1, id, 3), terminado])
        });

        let service = ReporteService::new(
            Arc::new(MockVencimientoRepository::new()),
            Arc::new(entidades),
            Arc::new(vinculos),
            asignaciones_service(asignaciones, estados),
        );

        let reporte = service.entidad(1, today).await.unwrap();

        assert_eq!(reporte.documentacion.len(), 1);
        assert_eq!(reporte.recursos.len(), 1);
        assert_eq!(reporte.recursos[0].vinculo.recurso_id, 3);
        assert_eq!(reporte.estado_critico.map(|e| e.id), Some(8));
    }

    #[tokio::test]
    async fn test_entidad_report_skips_recursos_dados_de_baja() {
        let today = d(2025, 6, 1);

        let mut asignaciones = MockAsignacionRepository::new();
        asignaciones
            .expect_list()
            .withf(|tipo, _| *tipo == TipoAsignacion::Entidad)
            .returning(|_, _| Ok(vec![]));
        asignaciones
            .expect_list()
            .withf(|tipo, _| *tipo == TipoAsignacion::Recurso)
            .never();

        let mut estados = MockEstadoRepository::new();
        estados
            .expect_list_for_entidad()
            .returning(|_, _| Ok(vec![]));

        let mut entidades = MockEntidadRepository::new();
        entidades
            .expect_find_by_id()
            .returning(|id| Ok(Some(entidad(id))));

        let mut vinculos = MockVinculoRepository::new();
        vinculos.expect_list_by_entidad().returning(|id| {
            let mut de_baja = vinculo(1, id, 3);
            de_baja.recurso_fecha_baja = Some(d(2025, 3, 1));
            Ok(vec![de_baja])
        });

        let service = ReporteService::new(
            Arc::new(MockVencimientoRepository::new()),
            Arc::new(entidades),
            Arc::new(vinculos),
            asignaciones_service(asignaciones, estados),
        );

        let reporte = service.entidad(1, today).await.unwrap();

        assert!(reporte.recursos.is_empty());
        assert_eq!(reporte.estado_critico, None);
    }
}
