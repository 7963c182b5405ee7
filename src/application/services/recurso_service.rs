//! Recurso management service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

use super::estado_service::ensure_estado;
use crate::domain::entities::{Recurso, RecursoValores, UpdateRecurso, Vinculo};
use crate::domain::repositories::{
    EstadoRepository, ListQuery, RecursoRepository, VinculoRepository,
};
use crate::error::AppError;
use crate::utils::validation::normalize_cuit;

/// Normalizes an optional CUIT/CUIL to its 11 digits.
pub(crate) fn normalize_optional_cuit(
    value: Option<String>,
    campo: &str,
) -> Result<Option<String>, AppError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => normalize_cuit(raw).map(Some).ok_or_else(|| {
            AppError::bad_request(
                "Invalid CUIT/CUIL",
                json!({ "field": campo, "value": raw }),
            )
        }),
    }
}

pub struct RecursoService {
    recursos: Arc<dyn RecursoRepository>,
    vinculos: Arc<dyn VinculoRepository>,
    estados: Arc<dyn EstadoRepository>,
}

impl RecursoService {
    pub fn new(
        recursos: Arc<dyn RecursoRepository>,
        vinculos: Arc<dyn VinculoRepository>,
        estados: Arc<dyn EstadoRepository>,
    ) -> Self {
        Self {
            recursos,
            vinculos,
            estados,
        }
    }

    pub async fn list(&self, query: ListQuery, incluir_bajas: bool) -> Result<Vec<Recurso>, AppError> {
        self.recursos.list(query, incluir_bajas).await
    }

    pub async fn count(&self, search: Option<String>, incluir_bajas: bool) -> Result<i64, AppError> {
        self.recursos.count(search, incluir_bajas).await
    }

    pub async fn get(&self, id: i64) -> Result<Recurso, AppError> {
        self.recursos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Recurso not found", json!({ "id": id })))
    }

    pub async fn create(
        &self,
        valores: RecursoValores,
        created_by: Option<i64>,
    ) -> Result<Recurso, AppError> {
        let valores = self.prepare(valores).await?;
        let recurso = self.recursos.create(valores, created_by).await?;

        info!(id = recurso.id, codigo = %recurso.codigo, "Recurso created");
        Ok(recurso)
    }

    pub async fn update(&self, id: i64, cambios: UpdateRecurso) -> Result<Recurso, AppError> {
        let current = self.get(id).await?;
        let valores = self.prepare(cambios.apply(RecursoValores::from(&current))).await?;
        let recurso = self.recursos.update(id, valores).await?;

        info!(id, codigo = %recurso.codigo, "Recurso updated");
        Ok(recurso)
    }

    /// Soft-deletes a recurso by setting `fecha_baja` to `today`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recurso does not exist or is
    /// already dado de baja.
    pub async fn dar_de_baja(&self, id: i64, today: NaiveDate) -> Result<(), AppError> {
        if !self.recursos.dar_de_baja(id, today).await? {
            return Err(AppError::not_found(
                "Recurso not found or already dado de baja",
                json!({ "id": id }),
            ));
        }

        info!(id, fecha_baja = %today, "Recurso dado de baja");
        Ok(())
    }

    /// Entidades the recurso is linked to.
    pub async fn entidades(&self, id: i64) -> Result<Vec<Vinculo>, AppError> {
        self.get(id).await?;
        self.vinculos.list_by_recurso(id).await
    }

    async fn prepare(&self, mut valores: RecursoValores) -> Result<RecursoValores, AppError> {
        valores.cuil = normalize_optional_cuit(valores.cuil, "cuil")?;

        if let Some(baja) = valores.fecha_baja {
            if baja < valores.fecha_alta {
                return Err(AppError::bad_request(
                    "fecha_baja cannot be before fecha_alta",
                    json!({ "fecha_alta": valores.fecha_alta, "fecha_baja": baja }),
                ));
            }
        }

        ensure_estado(self.estados.as_ref(), valores.estado_id, "estado_id").await?;
        Ok(valores)
    }
}
