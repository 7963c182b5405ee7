//! Document type management service.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use tracing::info;

use super::estado_service::ensure_estado;
use super::vencimiento_service::VencimientoService;
use crate::domain::entities::{Documentacion, DocumentacionValores, UpdateDocumentacion};
use crate::domain::repositories::{DocumentacionRepository, EstadoRepository, ListQuery};
use crate::domain::vencimiento::derive_fecha_vencimiento;
use crate::error::AppError;

/// Manages document types.
///
/// Universal documents carry one set of dates shared by every holder; their
/// expiration date is derived from `fecha_emision + dias_vigencia` when not
/// given, and their estado is computed when the caller leaves it empty.
pub struct DocumentacionService {
    documentaciones: Arc<dyn DocumentacionRepository>,
    estados: Arc<dyn EstadoRepository>,
    vencimientos: Arc<VencimientoService>,
}

impl DocumentacionService {
    pub fn new(
        documentaciones: Arc<dyn DocumentacionRepository>,
        estados: Arc<dyn EstadoRepository>,
        vencimientos: Arc<VencimientoService>,
    ) -> Self {
        Self {
            documentaciones,
            estados,
            vencimientos,
        }
    }

    pub async fn list(&self, query: ListQuery) -> Result<Vec<Documentacion>, AppError> {
        self.documentaciones.list(query).await
    }

    pub async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        self.documentaciones.count(search).await
    }

    pub async fn get(&self, id: i64) -> Result<Documentacion, AppError> {
        self.documentaciones
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Documentacion not found", json!({ "id": id })))
    }

    pub async fn create(
        &self,
        mut valores: DocumentacionValores,
        created_by: Option<i64>,
        today: NaiveDate,
    ) -> Result<Documentacion, AppError> {
        if valores.fecha_vencimiento.is_none() {
            valores.fecha_vencimiento =
                derive_fecha_vencimiento(valores.fecha_emision, valores.dias_vigencia);
        }

        let valores = self.prepare(valores, true, today).await?;
        let doc = self.documentaciones.create(valores, created_by).await?;

        info!(id = doc.id, codigo = %doc.codigo, "Documentacion created");
        Ok(doc)
    }

    pub async fn update(
        &self,
        id: i64,
        cambios: UpdateDocumentacion,
        today: NaiveDate,
    ) -> Result<Documentacion, AppError> {
        let current = self.get(id).await?;

        let rederive = cambios.fecha_emision.is_some() && cambios.fecha_vencimiento.is_none();
        let estado_vacio = cambios.estado_id.is_none() || cambios.estado_id == Some(None);

        let mut valores = cambios.apply(DocumentacionValores::from(&current));
        if rederive {
            if let Some(derived) =
                derive_fecha_vencimiento(valores.fecha_emision, valores.dias_vigencia)
            {
                valores.fecha_vencimiento = Some(derived);
            }
        }

        let valores = self.prepare(valores, estado_vacio, today).await?;
        let doc = self.documentaciones.update(id, valores).await?;

        info!(id, codigo = %doc.codigo, "Documentacion updated");
        Ok(doc)
    }

    /// Deletes a document type.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] while it is assigned to any recurso or entidad.
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if self.documentaciones.is_assigned(id).await? {
            return Err(AppError::conflict(
                "Documentacion is assigned to recursos or entidades",
                json!({ "id": id }),
            ));
        }

        if !self.documentaciones.delete(id).await? {
            return Err(AppError::not_found("Documentacion not found", json!({ "id": id })));
        }

        info!(id, "Documentacion deleted");
        Ok(())
    }

    /// Cross-field checks, estado references and the computed estado of
    /// universal documents.
    async fn prepare(
        &self,
        mut valores: DocumentacionValores,
        compute_estado: bool,
        today: NaiveDate,
    ) -> Result<DocumentacionValores, AppError> {
        if valores.dias_anticipacion > valores.dias_vigencia {
            return Err(AppError::bad_request(
                "dias_anticipacion cannot exceed dias_vigencia",
                json!({
                    "dias_anticipacion": valores.dias_anticipacion,
                    "dias_vigencia": valores.dias_vigencia,
                }),
            ));
        }

        ensure_estado(
            self.estados.as_ref(),
            valores.estado_vencimiento_id,
            "estado_vencimiento_id",
        )
        .await?;
        ensure_estado(self.estados.as_ref(), valores.estado_id, "estado_id").await?;

        if valores.es_universal && compute_estado {
            if let Some(estado_id) = self
                .vencimientos
                .estado_para(
                    valores.fecha_vencimiento,
                    valores.dias_anticipacion,
                    valores.estado_vencimiento_id,
                    today,
                )
                .await?
            {
                valores.estado_id = Some(estado_id);
            }
        }

        Ok(valores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EstadoNames;
    use crate::domain::repositories::{MockDocumentacionRepository, MockVencimientoRepository};
    use crate::test_support::{d, documentacion, estados_seeded};

    fn service(docs: MockDocumentacionRepository) -> DocumentacionService {
        let estados: Arc<dyn EstadoRepository> = Arc::new(estados_seeded());
        let vencimientos = Arc::new(VencimientoService::new(
            Arc::new(MockVencimientoRepository::new()),
            estados.clone(),
            EstadoNames::default(),
        ));
        DocumentacionService::new(Arc::new(docs), estados, vencimientos)
    }

    fn valores() -> DocumentacionValores {
        DocumentacionValores::from(&documentacion(1, "ART"))
    }

    #[tokio::test]
    async fn test_create_rejects_anticipacion_over_vigencia() {
        let mut docs = MockDocumentacionRepository::new();
        docs.expect_create().never();

        let mut v = valores();
        v.dias_vigencia = 10;
        v.dias_anticipacion = 11;

        let err = service(docs).create(v, None, d(2025, 1, 1)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_estado_vencimiento() {
        let mut docs = MockDocumentacionRepository::new();
        docs.expect_create().never();

        let mut v = valores();
        v.estado_vencimiento_id = Some(999);

        let err = service(docs).create(v, None, d(2025, 1, 1)).await.unwrap_err();
        assert_eq!(err.to_error_info().details["field"], "estado_vencimiento_id");
    }

    #[tokio::test]
    async fn test_create_universal_derives_dates_and_estado() {
        let mut docs = MockDocumentacionRepository::new();
        docs.expect_create()
            .withf(|v, created_by| {
                v.fecha_vencimiento == Some(d(2025, 1, 31))
                    // expires in 30 days with 30 days of warning: por vencer
                    && v.estado_id == Some(5)
                    && *created_by == Some(3)
            })
            .times(1)
            .returning(|_, _| Ok(documentacion(1, "ART")));

        let mut v = valores();
        v.es_universal = true;
        v.dias_vigencia = 30;
        v.dias_anticipacion = 30;
        v.fecha_emision = Some(d(2025, 1, 1));

        service(docs).create(v, Some(3), d(2025, 1, 1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_new_emision_rederives_vencimiento() {
        let mut docs = MockDocumentacionRepository::new();
        docs.expect_find_by_id().returning(|id| {
            let mut doc = documentacion(id, "ART");
            doc.dias_vigencia = 100;
            doc.fecha_emision = Some(d(2024, 1, 1));
            doc.fecha_vencimiento = Some(d(2024, 4, 10));
            Ok(Some(doc))
        });
        docs.expect_update()
            .withf(|id, v| *id == 1 && v.fecha_vencimiento == Some(d(2025, 4, 11)))
            .times(1)
            .returning(|id, _| Ok(documentacion(id, "ART")));

        let cambios = UpdateDocumentacion {
            fecha_emision: Some(Some(d(2025, 1, 1))),
            ..Default::default()
        };

        service(docs).update(1, cambios, d(2025, 1, 1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_assigned_is_conflict() {
        let mut docs = MockDocumentacionRepository::new();
        docs.expect_is_assigned().returning(|_| Ok(true));
        docs.expect_delete().never();

        assert!(matches!(
            service(docs).delete(1).await,
            Err(AppError::Conflict { .. })
        ));
    }
}
