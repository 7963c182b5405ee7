//! PostgreSQL implementation of the user repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUsuario, UpdateUsuario, Usuario};
use crate::domain::repositories::{ListQuery, UsuarioRepository, search_pattern};
use crate::error::AppError;
use serde_json::json;

const COLUMNS: &str =
    "id, username, email, password_hash, nombre, apellido, rol, activo, created_at, updated_at";

pub struct PgUsuarioRepository {
    pool: Arc<PgPool>,
}

impl PgUsuarioRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UsuarioRepository for PgUsuarioRepository {
    async fn create(&self, nuevo: NewUsuario) -> Result<Usuario, AppError> {
        let sql = format!(
            r#"
            INSERT INTO usuarios (username, email, password_hash, nombre, apellido, rol)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#
        );

        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(&nuevo.username)
            .bind(&nuevo.email)
            .bind(&nuevo.password_hash)
            .bind(&nuevo.nombre)
            .bind(&nuevo.apellido)
            .bind(nuevo.rol.as_str())
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(usuario)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Usuario>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM usuarios WHERE id = $1");

        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(usuario)
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Usuario>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM usuarios
            WHERE LOWER(username) = LOWER($1) OR LOWER(email) = LOWER($1)
            ORDER BY (LOWER(username) = LOWER($1)) DESC
            LIMIT 1
            "#
        );

        let usuario = sqlx::query_as::<_, Usuario>(&sql)
            .bind(login)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(usuario)
    }

    async fn list(&self, query: ListQuery) -> Result<Vec<Usuario>, AppError> {
        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM usuarios
            WHERE ($1::text IS NULL
                   OR username ILIKE $1 OR email ILIKE $1
                   OR nombre ILIKE $1 OR apellido ILIKE $1)
            ORDER BY username
            LIMIT $2 OFFSET $3
            "#
        );

        let rows = sqlx::query_as::<_, Usuario>(&sql)
            .bind(query.pattern())
            .bind(query.limit)
            .bind(query.offset)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM usuarios
            WHERE ($1::text IS NULL
                   OR username ILIKE $1 OR email ILIKE $1
                   OR nombre ILIKE $1 OR apellido ILIKE $1)
            "#,
        )
        .bind(search_pattern(search.as_deref()))
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn update(&self, id: i64, cambios: UpdateUsuario) -> Result<Usuario, AppError> {
        let sql = format!(
            r#"
            UPDATE usuarios SET
                email = COALESCE($2, email),
                nombre = COALESCE($3, nombre),
                apellido = COALESCE($4, apellido),
                rol = COALESCE($5, rol),
                activo = COALESCE($6, activo),
                password_hash = COALESCE($7, password_hash),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        );

        sqlx::query_as::<_, Usuario>(&sql)
            .bind(id)
            .bind(cambios.email)
            .bind(cambios.nombre)
            .bind(cambios.apellido)
            .bind(cambios.rol.map(|r| r.as_str()))
            .bind(cambios.activo)
            .bind(cambios.password_hash)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Usuario not found", json!({ "id": id })))
    }
}
