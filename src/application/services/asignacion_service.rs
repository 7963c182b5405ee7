//! Document assignments of recursos and entidades.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;
use tracing::info;

use super::estado_service::ensure_estado;
use super::vencimiento_service::VencimientoService;
use crate::domain::entities::{
    Asignacion, AsignacionPatch, AsignacionValores, Estado, NuevaAsignacion, TipoAsignacion,
};
use crate::domain::repositories::{
    AsignacionRepository, DocumentacionRepository, EntidadRepository, EstadoRepository,
    RecursoRepository,
};
use crate::domain::vencimiento::{DocumentStatus, compute_status, dias_restantes, most_critical};
use crate::error::AppError;

/// An assignment with its computed status on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AsignacionDetalle {
    #[serde(flatten)]
    pub asignacion: Asignacion,
    pub status: Option<DocumentStatus>,
    pub dias_restantes: Option<i64>,
}

impl AsignacionDetalle {
    pub fn new(asignacion: Asignacion, today: NaiveDate) -> Self {
        let status = compute_status(
            asignacion.fecha_vencimiento,
            asignacion.dias_anticipacion,
            today,
        );
        let dias_restantes = asignacion
            .fecha_vencimiento
            .map(|fv| dias_restantes(fv, today));

        Self {
            asignacion,
            status,
            dias_restantes,
        }
    }
}

/// Assigns document types to recursos and entidades.
///
/// New assignments derive their expiration date from the document type's
/// `dias_vigencia` when none is given, and get their estado computed from
/// the dates unless the caller sets one.
pub struct AsignacionService {
    asignaciones: Arc<dyn AsignacionRepository>,
    documentaciones: Arc<dyn DocumentacionRepository>,
    recursos: Arc<dyn RecursoRepository>,
    entidades: Arc<dyn EntidadRepository>,
    estados: Arc<dyn EstadoRepository>,
    vencimientos: Arc<VencimientoService>,
}

impl AsignacionService {
    pub fn new(
        asignaciones: Arc<dyn AsignacionRepository>,
        documentaciones: Arc<dyn DocumentacionRepository>,
        recursos: Arc<dyn RecursoRepository>,
        entidades: Arc<dyn EntidadRepository>,
        estados: Arc<dyn EstadoRepository>,
        vencimientos: Arc<VencimientoService>,
    ) -> Self {
        Self {
            asignaciones,
            documentaciones,
            recursos,
            entidades,
            estados,
            vencimientos,
        }
    }

    async fn ensure_titular(&self, tipo: TipoAsignacion, id: i64) -> Result<(), AppError> {
        let exists = match tipo {
            TipoAsignacion::Recurso => self.recursos.find_by_id(id).await?.is_some(),
            TipoAsignacion::Entidad => self.entidades.find_by_id(id).await?.is_some(),
            TipoAsignacion::Universal => {
                return Err(AppError::bad_request(
                    "Universal documents cannot be assigned",
                    json!({}),
                ));
            }
        };

        if exists {
            Ok(())
        } else {
            Err(AppError::not_found(
                format!("{} not found", titular_label(tipo)),
                json!({ "id": id }),
            ))
        }
    }

    pub async fn list(
        &self,
        tipo: TipoAsignacion,
        titular_id: i64,
        today: NaiveDate,
    ) -> Result<Vec<AsignacionDetalle>, AppError> {
        self.ensure_titular(tipo, titular_id).await?;

        let rows = self.asignaciones.list(tipo, titular_id).await?;
        Ok(rows
            .into_iter()
            .map(|a| AsignacionDetalle::new(a, today))
            .collect())
    }

    /// Assigns a document type to a recurso or entidad.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the holder does not exist
    /// - [`AppError::Validation`] for an unknown documentacion or estado
    /// - [`AppError::Conflict`] if the holder already has the documentacion
    pub async fn create(
        &self,
        tipo: TipoAsignacion,
        titular_id: i64,
        input: NuevaAsignacion,
        today: NaiveDate,
    ) -> Result<AsignacionDetalle, AppError> {
        self.ensure_titular(tipo, titular_id).await?;

        let doc = self
            .documentaciones
            .find_by_id(input.documentacion_id)
            .await?
            .ok_or_else(|| {
                AppError::bad_request(
                    "Referenced documentacion does not exist",
                    json!({ "field": "documentacion_id", "documentacion_id": input.documentacion_id }),
                )
            })?;

        ensure_estado(self.estados.as_ref(), input.estado_id, "estado_id").await?;

        let mut valores = AsignacionValores::nueva(&input, doc.dias_vigencia);
        if valores.estado_id.is_none() {
            valores.estado_id = self
                .vencimientos
                .estado_para(
                    valores.fecha_vencimiento,
                    doc.dias_anticipacion,
                    doc.estado_vencimiento_id,
                    today,
                )
                .await?;
        }

        let asignacion = self
            .asignaciones
            .create(tipo, titular_id, doc.id, valores, input.flags)
            .await?;

        info!(
            tipo = tipo.as_str(),
            id = asignacion.id,
            titular_id,
            codigo = %doc.codigo,
            "Documentacion assigned"
        );
        Ok(AsignacionDetalle::new(asignacion, today))
    }

    /// Updates an assignment. When the caller does not set the estado and
    /// the dates yield a status, the estado is recomputed.
    pub async fn update(
        &self,
        tipo: TipoAsignacion,
        id: i64,
        patch: AsignacionPatch,
        today: NaiveDate,
    ) -> Result<AsignacionDetalle, AppError> {
        let current = self.find(tipo, id).await?;

        let doc = self
            .documentaciones
            .find_by_id(current.documentacion_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Documentacion not found",
                    json!({ "id": current.documentacion_id }),
                )
            })?;

        if let Some(estado_id) = patch.estado_id {
            ensure_estado(self.estados.as_ref(), estado_id, "estado_id").await?;
        }

        let mut valores = patch.apply(current.valores(), doc.dias_vigencia);
        let flags = patch.apply_flags(current.flags());

        if !patch.sets_estado() {
            if let Some(estado_id) = self
                .vencimientos
                .estado_para(
                    valores.fecha_vencimiento,
                    doc.dias_anticipacion,
                    doc.estado_vencimiento_id,
                    today,
                )
                .await?
            {
                valores.estado_id = Some(estado_id);
            }
        }

        let asignacion = self.asignaciones.update(tipo, id, valores, flags).await?;

        info!(tipo = tipo.as_str(), id, "Asignacion updated");
        Ok(AsignacionDetalle::new(asignacion, today))
    }

    pub async fn delete(&self, tipo: TipoAsignacion, id: i64) -> Result<(), AppError> {
        if !self.asignaciones.delete(tipo, id).await? {
            return Err(AppError::not_found(
                "Asignacion not found",
                json!({ "id": id }),
            ));
        }

        info!(tipo = tipo.as_str(), id, "Asignacion deleted");
        Ok(())
    }

    /// The most critical estado across a holder's assignments. For an
    /// entidad this includes the assignments of its active recursos.
    pub async fn estado_critico(
        &self,
        tipo: TipoAsignacion,
        titular_id: i64,
        today: NaiveDate,
    ) -> Result<Option<Estado>, AppError> {
        self.ensure_titular(tipo, titular_id).await?;

        let estados = match tipo {
            TipoAsignacion::Entidad => self.estados.list_for_entidad(titular_id, today).await?,
            _ => self.estados.list_for_recurso(titular_id).await?,
        };

        Ok(most_critical(&estados).cloned())
    }

    async fn find(&self, tipo: TipoAsignacion, id: i64) -> Result<Asignacion, AppError> {
        self.asignaciones
            .find_by_id(tipo, id)
            .await?
            .ok_or_else(|| AppError::not_found("Asignacion not found", json!({ "id": id })))
    }
}

fn titular_label(tipo: TipoAsignacion) -> &'static str {
    match tipo {
        TipoAsignacion::Recurso => "Recurso",
        TipoAsignacion::Entidad => "Entidad",
        TipoAsignacion::Universal => "Documentacion",
    }
}
