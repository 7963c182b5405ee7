//! PostgreSQL implementation of the expiration query repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{
    DocumentoVencible, EstadoConteo, TipoAsignacion, Totales, VencimientoFilter, VencimientoItem,
};
use crate::domain::repositories::VencimientoRepository;
use crate::error::AppError;

/// PostgreSQL repository for the queries that span every document table.
///
/// Recurso assignments, entidad assignments and universal documentacion are
/// combined with `UNION ALL` and tagged with a `tipo` column.
pub struct PgVencimientoRepository {
    pool: Arc<PgPool>,
}

impl PgVencimientoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VencimientoRepository for PgVencimientoRepository {
    async fn list_vencibles(&self) -> Result<Vec<DocumentoVencible>, AppError> {
        let rows = sqlx::query_as::<_, DocumentoVencible>(
            r#"
            SELECT 'recurso' AS tipo, a.id, a.fecha_vencimiento, d.dias_anticipacion,
                   a.estado_id, d.estado_vencimiento_id
            FROM recurso_documentacion a
            JOIN documentacion d ON d.id = a.documentacion_id
            JOIN recursos r ON r.id = a.recurso_id
            WHERE r.fecha_baja IS NULL
            UNION ALL
            SELECT 'entidad' AS tipo, a.id, a.fecha_vencimiento, d.dias_anticipacion,
                   a.estado_id, d.estado_vencimiento_id
            FROM entidad_documentacion a
            JOIN documentacion d ON d.id = a.documentacion_id
            JOIN entidades en ON en.id = a.entidad_id
            WHERE en.deleted_at IS NULL
            UNION ALL
            SELECT 'universal' AS tipo, d.id, d.fecha_vencimiento, d.dias_anticipacion,
                   d.estado_id, d.estado_vencimiento_id
            FROM documentacion d
            WHERE d.es_universal
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn update_estado(
        &self,
        tipo: TipoAsignacion,
        id: i64,
        estado_id: i64,
    ) -> Result<(), AppError> {
        let tabla = match tipo {
            TipoAsignacion::Recurso => "recurso_documentacion",
            TipoAsignacion::Entidad => "entidad_documentacion",
            TipoAsignacion::Universal => "documentacion",
        };
        let sql = format!("UPDATE {tabla} SET estado_id = $2, updated_at = NOW() WHERE id = $1");

        sqlx::query(&sql)
            .bind(id)
            .bind(estado_id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn find_vencimientos(
        &self,
        filter: VencimientoFilter,
        today: NaiveDate,
    ) -> Result<Vec<VencimientoItem>, AppError> {
        let rows = sqlx::query_as::<_, VencimientoItem>(
            r#"
            SELECT * FROM (
                SELECT 'recurso' AS tipo, a.id AS asignacion_id, r.id AS titular_id,
                       r.apellido || ', ' || r.nombre AS titular,
                       d.id AS documentacion_id, d.codigo AS documentacion_codigo,
                       a.fecha_vencimiento, d.dias_anticipacion, a.estado_id,
                       e.nombre AS estado_nombre, e.color AS estado_color
                FROM recurso_documentacion a
                JOIN documentacion d ON d.id = a.documentacion_id
                JOIN recursos r ON r.id = a.recurso_id
                LEFT JOIN estados e ON e.id = a.estado_id
                WHERE a.fecha_vencimiento IS NOT NULL
                  AND r.fecha_baja IS NULL
                  AND ($3::bigint IS NULL OR EXISTS (
                        SELECT 1 FROM entidad_recurso er
                        WHERE er.recurso_id = r.id
                          AND er.entidad_id = $3
                          AND (er.fecha_fin IS NULL OR er.fecha_fin >= $4)))
                UNION ALL
                SELECT 'entidad', a.id, en.id, en.razon_social,
                       d.id, d.codigo, a.fecha_vencimiento, d.dias_anticipacion, a.estado_id,
                       e.nombre, e.color
                FROM entidad_documentacion a
                JOIN documentacion d ON d.id = a.documentacion_id
                JOIN entidades en ON en.id = a.entidad_id
                LEFT JOIN estados e ON e.id = a.estado_id
                WHERE a.fecha_vencimiento IS NOT NULL
                  AND en.deleted_at IS NULL
                  AND ($3::bigint IS NULL OR en.id = $3)
                UNION ALL
                SELECT 'universal', d.id, NULL::bigint, d.descripcion,
                       d.id, d.codigo, d.fecha_vencimiento, d.dias_anticipacion, d.estado_id,
                       e.nombre, e.color
                FROM documentacion d
                LEFT JOIN estados e ON e.id = d.estado_id
                WHERE d.es_universal
                  AND d.fecha_vencimiento IS NOT NULL
                  AND $3::bigint IS NULL
            ) v
            WHERE ($1::date IS NULL OR v.fecha_vencimiento >= $1)
              AND ($2::date IS NULL OR v.fecha_vencimiento <= $2)
            ORDER BY v.fecha_vencimiento, v.titular, v.documentacion_codigo
            "#,
        )
        .bind(filter.desde)
        .bind(filter.hasta)
        .bind(filter.entidad_id)
        .bind(today)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn estado_distribution(&self) -> Result<Vec<EstadoConteo>, AppError> {
        let rows = sqlx::query_as::<_, EstadoConteo>(
            r#"
            SELECT e.id AS estado_id, e.nombre, e.color, e.nivel, COUNT(*) AS cantidad
            FROM (
                SELECT a.estado_id
                FROM recurso_documentacion a
                JOIN recursos r ON r.id = a.recurso_id
                WHERE r.fecha_baja IS NULL
                UNION ALL
                SELECT a.estado_id
                FROM entidad_documentacion a
                JOIN entidades en ON en.id = a.entidad_id
                WHERE en.deleted_at IS NULL
            ) a
            LEFT JOIN estados e ON e.id = a.estado_id
            GROUP BY e.id, e.nombre, e.color, e.nivel
            ORDER BY e.nivel DESC NULLS LAST, e.nombre
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows)
    }

    async fn totales(&self) -> Result<Totales, AppError> {
        let (recursos_activos, entidades, documentaciones): (i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT
                (SELECT COUNT(*) FROM recursos WHERE fecha_baja IS NULL),
                (SELECT COUNT(*) FROM entidades WHERE deleted_at IS NULL),
                (SELECT COUNT(*) FROM documentacion)
            "#,
        )
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(Totales {
            recursos_activos,
            entidades,
            documentaciones,
        })
    }
}
