//! PostgreSQL implementation of the estado repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Estado, NewEstado, UpdateEstado};
use crate::domain::repositories::{EstadoRepository, ListQuery, search_pattern};
use crate::error::AppError;
use serde_json::json;

const COLUMNS: &str = "e.id, e.nombre, e.descripcion, e.color, e.nivel, e.created_at, e.updated_at";

pub struct PgEstadoRepository {
    pool: Arc<PgPool>,
}

impl PgEstadoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EstadoRepository for PgEstadoRepository {
    async fn list(&self, query: ListQuery) -> Result<Vec<Estado>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM estados e
            WHERE ($1::text IS NULL OR e.nombre ILIKE $1 OR e.descripcion ILIKE $1)
            ORDER BY e.nivel, e.nombre
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, Estado>(&sql)
            .bind(query.pattern())
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM estados WHERE ($1::text IS NULL OR nombre ILIKE $1 OR descripcion ILIKE $1)",
        )
        .bind(search_pattern(search.as_deref()))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Estado>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM estados e WHERE e.id = $1");

        let estado = sqlx::query_as::<_, Estado>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(estado)
    }

    async fn find_by_nombre(&self, nombre: &str) -> Result<Option<Estado>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM estados e WHERE LOWER(e.nombre) = LOWER($1)");

        let estado = sqlx::query_as::<_, Estado>(&sql)
            .bind(nombre)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(estado)
    }

    async fn create(&self, nuevo: NewEstado) -> Result<Estado, AppError> {
        let sql = format!(
            r#"
            INSERT INTO estados AS e (nombre, descripcion, color, nivel)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        );

        let estado = sqlx::query_as::<_, Estado>(&sql)
            .bind(&nuevo.nombre)
            .bind(&nuevo.descripcion)
            .bind(&nuevo.color)
            .bind(nuevo.nivel)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(estado)
    }

    async fn update(&self, id: i64, cambios: UpdateEstado) -> Result<Estado, AppError> {
        let sql = format!(
            r#"
            UPDATE estados AS e SET
                nombre = COALESCE($2, e.nombre),
                descripcion = CASE WHEN $3 THEN $4 ELSE e.descripcion END,
                color = COALESCE($5, e.color),
                nivel = COALESCE($6, e.nivel),
                updated_at = NOW()
            WHERE e.id = $1
            RETURNING {COLUMNS}
            "#
        );

        let set_descripcion = cambios.descripcion.is_some();

        sqlx::query_as::<_, Estado>(&sql)
            .bind(id)
            .bind(cambios.nombre)
            .bind(set_descripcion)
            .bind(cambios.descripcion.flatten())
            .bind(cambios.color)
            .bind(cambios.nivel)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Estado not found", json!({ "id": id })))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM estados WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn is_referenced(&self, id: i64) -> Result<bool, AppError> {
        let referenced: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM documentacion WHERE estado_id = $1 OR estado_vencimiento_id = $1)
                OR EXISTS (SELECT 1 FROM recursos WHERE estado_id = $1)
                OR EXISTS (SELECT 1 FROM recurso_documentacion WHERE estado_id = $1)
                OR EXISTS (SELECT 1 FROM entidad_documentacion WHERE estado_id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(referenced)
    }

    async fn list_for_recurso(&self, recurso_id: i64) -> Result<Vec<Estado>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM recurso_documentacion rd
            JOIN estados e ON e.id = rd.estado_id
            WHERE rd.recurso_id = $1
            ORDER BY rd.id
            "#
        );

        let rows = sqlx::query_as::<_, Estado>(&sql)
            .bind(recurso_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn list_for_entidad(
        &self,
        entidad_id: i64,
        today: NaiveDate,
    ) -> Result<Vec<Estado>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM (
                SELECT ed.estado_id, 0 AS grupo, ed.id AS orden
                FROM entidad_documentacion ed
                WHERE ed.entidad_id = $1
                UNION ALL
                SELECT rd.estado_id, 1 AS grupo, rd.id AS orden
                FROM entidad_recurso er
                JOIN recursos r ON r.id = er.recurso_id AND r.fecha_baja IS NULL
                JOIN recurso_documentacion rd ON rd.recurso_id = er.recurso_id
                WHERE er.entidad_id = $1
                  AND (er.fecha_fin IS NULL OR er.fecha_fin >= $2)
            ) a
            JOIN estados e ON e.id = a.estado_id
            ORDER BY a.grupo, a.orden
            "#
        );

        let rows = sqlx::query_as::<_, Estado>(&sql)
            .bind(entidad_id)
            .bind(today)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }
}
