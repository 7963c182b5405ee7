//! Entidad management service, including recurso links.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use super::recurso_service::normalize_optional_cuit;
use crate::domain::entities::{
    Entidad, EntidadValores, UpdateEntidad, Vinculo, VinculoPatch, VinculoValores,
};
use crate::domain::repositories::{
    EntidadRepository, ListQuery, RecursoRepository, VinculoRepository,
};
use crate::error::AppError;

pub struct EntidadService {
    entidades: Arc<dyn EntidadRepository>,
    vinculos: Arc<dyn VinculoRepository>,
    recursos: Arc<dyn RecursoRepository>,
}

impl EntidadService {
    pub fn new(
        entidades: Arc<dyn EntidadRepository>,
        vinculos: Arc<dyn VinculoRepository>,
        recursos: Arc<dyn RecursoRepository>,
    ) -> Self {
        Self {
            entidades,
            vinculos,
            recursos,
        }
    }

    pub async fn list(&self, query: ListQuery) -> Result<Vec<Entidad>, AppError> {
        self.entidades.list(query).await
    }

    pub async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        self.entidades.count(search).await
    }

    pub async fn get(&self, id: i64) -> Result<Entidad, AppError> {
        self.entidades
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Entidad not found", json!({ "id": id })))
    }

    pub async fn create(
        &self,
        mut valores: EntidadValores,
        created_by: Option<i64>,
    ) -> Result<Entidad, AppError> {
        valores.cuit = normalize_optional_cuit(valores.cuit, "cuit")?;
        let entidad = self.entidades.create(valores, created_by).await?;

        info!(id = entidad.id, razon_social = %entidad.razon_social, "Entidad created");
        Ok(entidad)
    }

    pub async fn update(&self, id: i64, cambios: UpdateEntidad) -> Result<Entidad, AppError> {
        let current = self.get(id).await?;

        let mut valores = cambios.apply(EntidadValores::from(&current));
        valores.cuit = normalize_optional_cuit(valores.cuit, "cuit")?;
        let entidad = self.entidades.update(id, valores).await?;

        info!(id, razon_social = %entidad.razon_social, "Entidad updated");
        Ok(entidad)
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.entidades.soft_delete(id).await? {
            return Err(AppError::not_found("Entidad not found", json!({ "id": id })));
        }

        info!(id, "Entidad deleted");
        Ok(())
    }

    pub async fn recursos(&self, entidad_id: i64) -> Result<Vec<Vinculo>, AppError> {
        self.get(entidad_id).await?;
        self.vinculos.list_by_entidad(entidad_id).await
    }

    /// Links a recurso to an entidad.
    ///
    /// # Errors
    ///
    /// - [`AppError::NotFound`] if the entidad does not exist
    /// - [`AppError::Validation`] for an unknown recurso or `fecha_fin < fecha_inicio`
    /// - [`AppError::Conflict`] if the recurso is already linked
    pub async fn vincular(
        &self,
        entidad_id: i64,
        recurso_id: i64,
        valores: VinculoValores,
    ) -> Result<Vinculo, AppError> {
        self.get(entidad_id).await?;

        if self.recursos.find_by_id(recurso_id).await?.is_none() {
            return Err(AppError::bad_request(
                "Referenced recurso does not exist",
                json!({ "field": "recurso_id", "recurso_id": recurso_id }),
            ));
        }

        ensure_fechas(&valores)?;

        let vinculo = self.vinculos.create(entidad_id, recurso_id, valores).await?;
        info!(id = vinculo.id, entidad_id, recurso_id, "Recurso linked to entidad");
        Ok(vinculo)
    }

    pub async fn update_vinculo(&self, id: i64, patch: VinculoPatch) -> Result<Vinculo, AppError> {
        let current = self
            .vinculos
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Vinculo not found", json!({ "id": id })))?;

        let valores = patch.apply(current.valores());
        ensure_fechas(&valores)?;

        let vinculo = self.vinculos.update(id, valores).await?;
        info!(id, "Vinculo updated");
        Ok(vinculo)
    }

    pub async fn delete_vinculo(&self, id: i64) -> Result<(), AppError> {
        if !self.vinculos.delete(id).await? {
            return Err(AppError::not_found("Vinculo not found", json!({ "id": id })));
        }

        info!(id, "Vinculo deleted");
        Ok(())
    }
}

fn ensure_fechas(valores: &VinculoValores) -> Result<(), AppError> {
    if valores.fechas_validas() {
        Ok(())
    } else {
        Err(AppError::bad_request(
            "fecha_fin cannot be before fecha_inicio",
            json!({ "fecha_inicio": valores.fecha_inicio, "fecha_fin": valores.fecha_fin }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{
        MockEntidadRepository, MockRecursoRepository, MockVinculoRepository,
    };
    use crate::test_support::{d, entidad, recurso, vinculo};

    fn entidades_found() -> MockEntidadRepository {
        let mut mock = MockEntidadRepository::new();
        mock.expect_find_by_id().returning(|id| Ok(Some(entidad(id))));
        mock
    }

    #[tokio::test]
    async fn test_vincular_rejects_inverted_dates() {
        let mut recursos = MockRecursoRepository::new();
        recursos
            .expect_find_by_id()
            .returning(|id| Ok(Some(recurso(id))));
        let mut vinculos = MockVinculoRepository::new();
        vinculos.expect_create().never();

        let service = EntidadService::new(
            Arc::new(entidades_found()),
            Arc::new(vinculos),
            Arc::new(recursos),
        );

        let err = service
            .vincular(
                1,
                2,
                VinculoValores {
                    fecha_inicio: d(2025, 3, 1),
                    fecha_fin: Some(d(2025, 2, 28)),
                    observaciones: None,
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_vincular_unknown_recurso_is_bad_request() {
        let mut recursos = MockRecursoRepository::new();
        recursos.expect_find_by_id().returning(|_| Ok(None));

        let service = EntidadService::new(
            Arc::new(entidades_found()),
            Arc::new(MockVinculoRepository::new()),
            Arc::new(recursos),
        );

        let err = service
            .vincular(
                1,
                99,
                VinculoValores {
                    fecha_inicio: d(2025, 3, 1),
                    fecha_fin: None,
                    observaciones: None,
                },
            )
            .await
            .unwrap_err();

        assert_eq!(err.to_error_info().details["field"], "recurso_id");
    }

    #[tokio::test]
    async fn test_update_vinculo_applies_patch() {
        let mut vinculos = MockVinculoRepository::new();
        vinculos
            .expect_find_by_id()
            .returning(|id| Ok(Some(vinculo(id, 1, 2))));
        vinculos
            .expect_update()
            .withf(|id, v| *id == 5 && v.fecha_fin == Some(d(2025, 12, 31)))
            .times(1)
            .returning(|id, v| {
                let mut vin = vinculo(id, 1, 2);
                vin.fecha_fin = v.fecha_fin;
                Ok(vin)
            });

        let service = EntidadService::new(
            Arc::new(MockEntidadRepository::new()),
            Arc::new(vinculos),
            Arc::new(MockRecursoRepository::new()),
        );

        let updated = service
            .update_vinculo(
                5,
                VinculoPatch {
                    fecha_fin: Some(Some(d(2025, 12, 31))),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.is_activo(d(2025, 12, 31)));
        assert!(!updated.is_activo(d(2026, 1, 1)));
    }

    #[tokio::test]
    async fn test_delete_missing_entidad_is_not_found() {
        let mut entidades = MockEntidadRepository::new();
        entidades.expect_soft_delete().returning(|_| Ok(false));

        let service = EntidadService::new(
            Arc::new(entidades),
            Arc::new(MockVinculoRepository::new()),
            Arc::new(MockRecursoRepository::new()),
        );

        assert!(matches!(
            service.delete(1).await,
            Err(AppError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_cuit() {
        let mut entidades = MockEntidadRepository::new();
        entidades.expect_create().never();

        let service = EntidadService::new(
            Arc::new(entidades),
            Arc::new(MockVinculoRepository::new()),
            Arc::new(MockRecursoRepository::new()),
        );

        let mut valores = EntidadValores::from(&entidad(1));
        valores.cuit = Some("30-7123".to_string());

        assert!(service.create(valores, None).await.is_err());
    }
}
