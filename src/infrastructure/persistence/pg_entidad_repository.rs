//! PostgreSQL implementation of the entidad repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Entidad, EntidadValores};
use crate::domain::repositories::{EntidadRepository, ListQuery, search_pattern};
use crate::error::AppError;
use serde_json::json;

const COLUMNS: &str = "id, razon_social, cuit, domicilio, telefono, localidad, email, \
     url_plataforma, observaciones, created_by, created_at, updated_at, deleted_at";

const FILTER: &str = r#"
    deleted_at IS NULL
    AND ($1::text IS NULL OR razon_social ILIKE $1 OR cuit ILIKE $1 OR localidad ILIKE $1)
"#;

/// PostgreSQL repository for entidades. Soft-deleted rows are filtered out
/// of every read.
pub struct PgEntidadRepository {
    pool: Arc<PgPool>,
}

impl PgEntidadRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntidadRepository for PgEntidadRepository {
    async fn list(&self, query: ListQuery) -> Result<Vec<Entidad>, AppError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM entidades WHERE {FILTER} ORDER BY razon_social LIMIT $2 OFFSET $3"
        );

        let rows = sqlx::query_as::<_, Entidad>(&sql)
            .bind(query.pattern())
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) FROM entidades WHERE {FILTER}");

        let count: i64 = sqlx::query_scalar(&sql)
            .bind(search_pattern(search.as_deref()))
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Entidad>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM entidades WHERE id = $1 AND deleted_at IS NULL");

        let entidad = sqlx::query_as::<_, Entidad>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(entidad)
    }

    async fn create(
        &self,
        v: EntidadValores,
        created_by: Option<i64>,
    ) -> Result<Entidad, AppError> {
        let sql = format!(
            r#"
            INSERT INTO entidades (
                razon_social, cuit, domicilio, telefono, localidad, email,
                url_plataforma, observaciones, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#
        );

        let entidad = sqlx::query_as::<_, Entidad>(&sql)
            .bind(v.razon_social)
            .bind(v.cuit)
            .bind(v.domicilio)
            .bind(v.telefono)
            .bind(v.localidad)
            .bind(v.email)
            .bind(v.url_plataforma)
            .bind(v.observaciones)
            .bind(created_by)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(entidad)
    }

    async fn update(&self, id: i64, v: EntidadValores) -> Result<Entidad, AppError> {
        let sql = format!(
            r#"
            UPDATE entidades SET
                razon_social = $2, cuit = $3, domicilio = $4, telefono = $5,
                localidad = $6, email = $7, url_plataforma = $8, observaciones = $9,
                updated_at = NOW()
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Entidad>(&sql)
            .bind(id)
            .bind(v.razon_social)
            .bind(v.cuit)
            .bind(v.domicilio)
            .bind(v.telefono)
            .bind(v.localidad)
            .bind(v.email)
            .bind(v.url_plataforma)
            .bind(v.observaciones)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Entidad not found", json!({ "id": id })))
    }

    async fn soft_delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE entidades SET deleted_at = NOW(), updated_at = NOW() WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
