//! PostgreSQL implementation of the entidad ↔ recurso link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Vinculo, VinculoValores};
use crate::domain::repositories::VinculoRepository;
use crate::error::AppError;
use serde_json::json;

fn select_from(source: &str) -> String {
    format!(
        r#"
        SELECT v.id, v.entidad_id, en.razon_social, v.recurso_id,
               r.codigo AS recurso_codigo, r.apellido AS recurso_apellido,
               r.nombre AS recurso_nombre, r.fecha_baja AS recurso_fecha_baja,
               v.fecha_inicio, v.fecha_fin,
               v.observaciones, v.created_at, v.updated_at
        FROM {source} v
        JOIN entidades en ON en.id = v.entidad_id
        JOIN recursos r ON r.id = v.recurso_id
        "#
    )
}

pub struct PgVinculoRepository {
    pool: Arc<PgPool>,
}

impl PgVinculoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VinculoRepository for PgVinculoRepository {
    async fn list_by_entidad(&self, entidad_id: i64) -> Result<Vec<Vinculo>, AppError> {
        let sql = format!(
            "{} WHERE v.entidad_id = $1 ORDER BY r.apellido, r.nombre, v.id",
            select_from("entidad_recurso")
        );

        let rows = sqlx::query_as::<_, Vinculo>(&sql)
            .bind(entidad_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn list_by_recurso(&self, recurso_id: i64) -> Result<Vec<Vinculo>, AppError> {
        let sql = format!(
            "{} WHERE v.recurso_id = $1 AND en.deleted_at IS NULL ORDER BY en.razon_social, v.id",
            select_from("entidad_recurso")
        );

        let rows = sqlx::query_as::<_, Vinculo>(&sql)
            .bind(recurso_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vinculo>, AppError> {
        let sql = format!("{} WHERE v.id = $1", select_from("entidad_recurso"));

        let row = sqlx::query_as::<_, Vinculo>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn create(
        &self,
        entidad_id: i64,
        recurso_id: i64,
        v: VinculoValores,
    ) -> Result<Vinculo, AppError> {
        let sql = format!(
            r#"
            WITH w AS (
                INSERT INTO entidad_recurso (entidad_id, recurso_id, fecha_inicio, fecha_fin, observaciones)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            {}
            "#,
            select_from("w")
        );

        let row = sqlx::query_as::<_, Vinculo>(&sql)
            .bind(entidad_id)
            .bind(recurso_id)
            .bind(v.fecha_inicio)
            .bind(v.fecha_fin)
            .bind(v.observaciones)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn update(&self, id: i64, v: VinculoValores) -> Result<Vinculo, AppError> {
        let sql = format!(
            r#"
            WITH w AS (
                UPDATE entidad_recurso SET
                    fecha_inicio = $2, fecha_fin = $3, observaciones = $4, updated_at = NOW()
                WHERE id = $1
                RETURNING *
            )
            {}
            "#,
            select_from("w")
        );

        sqlx::query_as::<_, Vinculo>(&sql)
            .bind(id)
            .bind(v.fecha_inicio)
            .bind(v.fecha_fin)
            .bind(v.observaciones)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Vinculo not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM entidad_recurso WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
