//! PostgreSQL implementation of the documentacion repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Documentacion, DocumentacionValores};
use crate::domain::repositories::{DocumentacionRepository, ListQuery, search_pattern};
use crate::error::AppError;
use serde_json::json;

const COLUMNS: &str = "id, codigo, descripcion, dias_vigencia, dias_anticipacion, es_obligatorio, \
     es_universal, estado_vencimiento_id, estado_id, fecha_emision, fecha_tramitacion, \
     fecha_vencimiento, observaciones, created_by, created_at, updated_at";

pub struct PgDocumentacionRepository {
    pool: Arc<PgPool>,
}

impl PgDocumentacionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentacionRepository for PgDocumentacionRepository {
    async fn list(&self, query: ListQuery) -> Result<Vec<Documentacion>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM documentacion
            WHERE ($1::text IS NULL OR codigo ILIKE $1 OR descripcion ILIKE $1)
            ORDER BY codigo
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, Documentacion>(&sql)
            .bind(query.pattern())
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM documentacion WHERE ($1::text IS NULL OR codigo ILIKE $1 OR descripcion ILIKE $1)",
        )
        .bind(search_pattern(search.as_deref()))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Documentacion>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM documentacion WHERE id = $1");

        let doc = sqlx::query_as::<_, Documentacion>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(doc)
    }

    async fn create(
        &self,
        v: DocumentacionValores,
        created_by: Option<i64>,
    ) -> Result<Documentacion, AppError> {
        let sql = format!(
            r#"
            INSERT INTO documentacion (
                codigo, descripcion, dias_vigencia, dias_anticipacion, es_obligatorio,
                es_universal, estado_vencimiento_id, estado_id, fecha_emision,
                fecha_tramitacion, fecha_vencimiento, observaciones, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {COLUMNS}
            "#
        );

        let doc = sqlx::query_as::<_, Documentacion>(&sql)
            .bind(v.codigo)
            .bind(v.descripcion)
            .bind(v.dias_vigencia)
            .bind(v.dias_anticipacion)
            .bind(v.es_obligatorio)
            .bind(v.es_universal)
            .bind(v.estado_vencimiento_id)
            .bind(v.estado_id)
            .bind(v.fecha_emision)
            .bind(v.fecha_tramitacion)
            .bind(v.fecha_vencimiento)
            .bind(v.observaciones)
            .bind(created_by)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(doc)
    }

    async fn update(&self, id: i64, v: DocumentacionValores) -> Result<Documentacion, AppError> {
        let sql = format!(
            r#"
            UPDATE documentacion SET
                codigo = $2, descripcion = $3, dias_vigencia = $4, dias_anticipacion = $5,
                es_obligatorio = $6, es_universal = $7, estado_vencimiento_id = $8,
                estado_id = $9, fecha_emision = $10, fecha_tramitacion = $11,
                fecha_vencimiento = $12, observaciones = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Documentacion>(&sql)
            .bind(id)
            .bind(v.codigo)
            .bind(v.descripcion)
            .bind(v.dias_vigencia)
            .bind(v.dias_anticipacion)
            .bind(v.es_obligatorio)
            .bind(v.es_universal)
            .bind(v.estado_vencimiento_id)
            .bind(v.estado_id)
            .bind(v.fecha_emision)
            .bind(v.fecha_tramitacion)
            .bind(v.fecha_vencimiento)
            .bind(v.observaciones)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Documentacion not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documentacion WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_assigned(&self, id: i64) -> Result<bool, AppError> {
        let assigned: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM recurso_documentacion WHERE documentacion_id = $1)
                OR EXISTS (SELECT 1 FROM entidad_documentacion WHERE documentacion_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(assigned)
    }
}
