//! PostgreSQL implementation of the recurso repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Recurso, RecursoValores};
use crate::domain::repositories::{ListQuery, RecursoRepository, search_pattern};
use crate::error::AppError;
use serde_json::json;

const COLUMNS: &str = "id, codigo, apellido, nombre, telefono, cuil, direccion, localidad, \
     observaciones, fecha_alta, fecha_baja, estado_id, created_by, created_at, updated_at";

const FILTER: &str = r#"
    ($1::text IS NULL
     OR codigo ILIKE $1 OR apellido ILIKE $1 OR nombre ILIKE $1 OR cuil ILIKE $1)
    AND ($2 OR fecha_baja IS NULL)
"#;

pub struct PgRecursoRepository {
    pool: Arc<PgPool>,
}

impl PgRecursoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecursoRepository for PgRecursoRepository {
    async fn list(&self, query: ListQuery, incluir_bajas: bool) -> Result<Vec<Recurso>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM recursos WHERE {FILTER} ORDER BY apellido, nombre, id LIMIT $3 OFFSET $4"
        );

        let rows = sqlx::query_as::<_, Recurso>(&sql)
            .bind(query.pattern())
            .bind(incluir_bajas)
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn count(&self, search: Option<String>, incluir_bajas: bool) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM recursos WHERE {FILTER}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(search_pattern(search.as_deref()))
            .bind(incluir_bajas)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Recurso>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM recursos WHERE id = $1");

        let recurso = sqlx::query_as::<_, Recurso>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(recurso)
    }

    async fn create(
        &self,
        v: RecursoValores,
        created_by: Option<i64>,
    ) -> Result<Recurso, AppError> {
        let sql = format!(
            r#"
            INSERT INTO recursos (
                codigo, apellido, nombre, telefono, cuil, direccion, localidad,
                observaciones, fecha_alta, fecha_baja, estado_id, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {COLUMNS}
            "#
        );

        let recurso = sqlx::query_as::<_, Recurso>(&sql)
            .bind(v.codigo)
            .bind(v.apellido)
            .bind(v.nombre)
            .bind(v.telefono)
            .bind(v.cuil)
            .bind(v.direccion)
            .bind(v.localidad)
            .bind(v.observaciones)
            .bind(v.fecha_alta)
            .bind(v.fecha_baja)
            .bind(v.estado_id)
            .bind(created_by)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(recurso)
    }

    async fn update(&self, id: i64, v: RecursoValores) -> Result<Recurso, AppError> {
        let sql = format!(
            r#"
            UPDATE recursos SET
                codigo = $2, apellido = $3, nombre = $4, telefono = $5, cuil = $6,
                direccion = $7, localidad = $8, observaciones = $9, fecha_alta = $10,
                fecha_baja = $11, estado_id = $12, updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Recurso>(&sql)
            .bind(id)
            .bind(v.codigo)
            .bind(v.apellido)
            .bind(v.nombre)
            .bind(v.telefono)
            .bind(v.cuil)
            .bind(v.direccion)
            .bind(v.localidad)
            .bind(v.observaciones)
            .bind(v.fecha_alta)
            .bind(v.fecha_baja)
            .bind(v.estado_id)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Recurso not found", json!({ "id": id })))
    }

    async fn dar_de_baja(&self, id: i64, fecha: NaiveDate) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE recursos
            SET fecha_baja = $2, updated_at = NOW()
            WHERE id = $1 AND fecha_baja IS NULL
            "#,
        )
        .bind(id)
        .bind(fecha)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
