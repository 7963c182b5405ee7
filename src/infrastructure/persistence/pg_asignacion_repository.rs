//! PostgreSQL implementation of the assignment repository.
//!
//! Recurso and entidad assignments live in two tables with the same shape
//! (entidad rows add two flags), so every query is built from a [`Tabla`].

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Asignacion, AsignacionValores, EntidadDocFlags, TipoAsignacion};
use crate::domain::repositories::AsignacionRepository;
use crate::error::AppError;
use serde_json::json;

struct Tabla {
    nombre: &'static str,
    titular: &'static str,
    con_flags: bool,
}

fn tabla(tipo: TipoAsignacion) -> Result<Tabla, AppError> {
    match tipo {
        TipoAsignacion::Recurso => Ok(Tabla {
            nombre: "recurso_documentacion",
            titular: "recurso_id",
            con_flags: false,
        }),
        TipoAsignacion::Entidad => Ok(Tabla {
            nombre: "entidad_documentacion",
            titular: "entidad_id",
            con_flags: true,
        }),
        TipoAsignacion::Universal => Err(AppError::internal(
            "Universal documents have no assignment table",
            json!({ "tipo": tipo.as_str() }),
        )),
    }
}

/// `SELECT` of the joined assignment row over `source`, aliased `a`.
fn select_from(t: &Tabla, source: &str) -> String {
    let flags = if t.con_flags {
        "a.es_inhabilitante, a.notificar_email"
    } else {
        "FALSE AS es_inhabilitante, FALSE AS notificar_email"
    };

    format!(
        r#"
        SELECT a.id, a.{titular} AS titular_id, a.documentacion_id,
               d.codigo AS documentacion_codigo, d.descripcion AS documentacion_descripcion,
               d.dias_anticipacion, a.fecha_emision, a.fecha_tramitacion, a.fecha_vencimiento,
               a.estado_id, e.nombre AS estado_nombre, e.color AS estado_color,
               e.nivel AS estado_nivel, a.observaciones, {flags},
               a.created_at, a.updated_at
        FROM {source} a
        JOIN documentacion d ON d.id = a.documentacion_id
        LEFT JOIN estados e ON e.id = a.estado_id
        "#,
        titular = t.titular,
    )
}

pub struct PgAsignacionRepository {
    pool: Arc<PgPool>,
}

impl PgAsignacionRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AsignacionRepository for PgAsignacionRepository {
    async fn list(
        &self,
        tipo: TipoAsignacion,
        titular_id: i64,
    ) -> Result<Vec<Asignacion>, AppError> {
        let t = tabla(tipo)?;
        let sql = format!(
            "{} WHERE a.{} = $1 ORDER BY d.codigo, a.id",
            select_from(&t, t.nombre),
            t.titular
        );

        let rows = sqlx::query_as::<_, Asignacion>(&sql)
            .bind(titular_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn find_by_id(
        &self,
        tipo: TipoAsignacion,
        id: i64,
    ) -> Result<Option<Asignacion>, AppError> {
        let t = tabla(tipo)?;
        let sql = format!("{} WHERE a.id = $1", select_from(&t, t.nombre));

        let row = sqlx::query_as::<_, Asignacion>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(row)
    }

    async fn create(
        &self,
        tipo: TipoAsignacion,
        titular_id: i64,
        documentacion_id: i64,
        v: AsignacionValores,
        flags: EntidadDocFlags,
    ) -> Result<Asignacion, AppError> {
        let t = tabla(tipo)?;
        let (flag_cols, flag_vals) = if t.con_flags {
            (", es_inhabilitante, notificar_email", ", $8, $9")
        } else {
            ("", "")
        };

        let sql = format!(
            r#"
            WITH w AS (
                INSERT INTO {tabla} (
                    {titular}, documentacion_id, fecha_emision, fecha_tramitacion,
                    fecha_vencimiento, estado_id, observaciones{flag_cols}
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7{flag_vals})
                RETURNING *
            )
            {select}
            "#,
            tabla = t.nombre,
            titular = t.titular,
            select = select_from(&t, "w"),
        );

        let mut query = sqlx::query_as::<_, Asignacion>(&sql)
            .bind(titular_id)
            .bind(documentacion_id)
            .bind(v.fecha_emision)
            .bind(v.fecha_tramitacion)
            .bind(v.fecha_vencimiento)
            .bind(v.estado_id)
            .bind(v.observaciones);
        if t.con_flags {
            query = query
                .bind(flags.es_inhabilitante)
                .bind(flags.notificar_email);
        }

        let row = query.fetch_one(self.pool.as_ref()).await?;

        Ok(row)
    }

    async fn update(
        &self,
        tipo: TipoAsignacion,
        id: i64,
        v: AsignacionValores,
        flags: EntidadDocFlags,
    ) -> Result<Asignacion, AppError> {
        let t = tabla(tipo)?;
        let flag_sets = if t.con_flags {
            ", es_inhabilitante = $7, notificar_email = $8"
        } else {
            ""
        };

        let sql = format!(
            r#"
            WITH w AS (
                UPDATE {tabla} SET
                    fecha_emision = $2, fecha_tramitacion = $3, fecha_vencimiento = $4,
                    estado_id = $5, observaciones = $6, updated_at = NOW(){flag_sets}
                WHERE id = $1
                RETURNING *
            )
            {select}
            "#,
            tabla = t.nombre,
            select = select_from(&t, "w"),
        );

        let mut query = sqlx::query_as::<_, Asignacion>(&sql)
            .bind(id)
            .bind(v.fecha_emision)
            .bind(v.fecha_tramitacion)
            .bind(v.fecha_vencimiento)
            .bind(v.estado_id)
            .bind(v.observaciones);
        if t.con_flags {
            query = query
                .bind(flags.es_inhabilitante)
                .bind(flags.notificar_email);
        }

        query
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Asignacion not found", json!({ "id": id })))
    }

    async fn delete(&self, tipo: TipoAsignacion, id: i64) -> Result<bool, AppError> {
        let t = tabla(tipo)?;
        let sql = format!("DELETE FROM {} WHERE id = $1", t.nombre);

        let result = sqlx::query(&sql)
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
