//! Estado management service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{Estado, NewEstado, UpdateEstado};
use crate::domain::repositories::{EstadoRepository, ListQuery};
use crate::error::AppError;

/// Checks that an optional estado reference points at an existing row.
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming `campo` when it does not.
pub(crate) async fn ensure_estado(
    estados: &dyn EstadoRepository,
    estado_id: Option<i64>,
    campo: &str,
) -> Result<(), AppError> {
    let Some(id) = estado_id else {
        return Ok(());
    };

    if estados.find_by_id(id).await?.is_none() {
        return Err(AppError::bad_request(
            "Referenced estado does not exist",
            json!({ "field": campo, "estado_id": id }),
        ));
    }

    Ok(())
}

pub struct EstadoService {
    estados: Arc<dyn EstadoRepository>,
}

impl EstadoService {
    pub fn new(estados: Arc<dyn EstadoRepository>) -> Self {
        Self { estados }
    }

    pub async fn list(&self, query: ListQuery) -> Result<Vec<Estado>, AppError> {
        self.estados.list(query).await
    }

    pub async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        self.estados.count(search).await
    }

    pub async fn get(&self, id: i64) -> Result<Estado, AppError> {
        self.estados
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Estado not found", json!({ "id": id })))
    }

    pub async fn create(&self, nuevo: NewEstado) -> Result<Estado, AppError> {
        let estado = self.estados.create(nuevo).await?;
        info!(id = estado.id, nombre = %estado.nombre, nivel = estado.nivel, "Estado created");
        Ok(estado)
    }

    pub async fn update(&self, id: i64, cambios: UpdateEstado) -> Result<Estado, AppError> {
        let estado = self.estados.update(id, cambios).await?;
        info!(id, nombre = %estado.nombre, "Estado updated");
        Ok(estado)
    }

    /// Deletes an estado.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while any document or assignment
    /// references it and [`AppError::NotFound`] for unknown ids.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.estados.is_referenced(id).await? {
            return Err(AppError::conflict(
                "Estado is referenced by documents or assignments",
                json!({ "id": id }),
            ));
        }

        if !self.estados.delete(id).await? {
            return Err(AppError::not_found("Estado not found", json!({ "id": id })));
        }

        info!(id, "Estado deleted");
        Ok(())
    }
}
