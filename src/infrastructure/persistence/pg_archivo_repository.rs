//! PostgreSQL implementation of the attachment metadata repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ArchivoOwner, DocumentoArchivo, NewDocumentoArchivo};
use crate::domain::repositories::ArchivoRepository;
use crate::error::AppError;

const COLUMNS: &str = "id, nombre_original, nombre_almacenado, mime_type, tamano, sha256, \
     descripcion, documentacion_id, recurso_documentacion_id, entidad_documentacion_id, \
     subido_por, created_at";

pub struct PgArchivoRepository {
    pool: Arc<PgPool>,
}

impl PgArchivoRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ArchivoRepository for PgArchivoRepository {
    async fn create(&self, nuevo: NewDocumentoArchivo) -> Result<DocumentoArchivo, AppError> {
        let (documentacion_id, recurso_documentacion_id, entidad_documentacion_id) =
            nuevo.owner.ids();

        let sql = format!(
            r#"
            INSERT INTO documento_archivos (
                nombre_original, nombre_almacenado, mime_type, tamano, sha256, descripcion,
                documentacion_id, recurso_documentacion_id, entidad_documentacion_id, subido_por
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {COLUMNS}
            "#
        );

        let archivo = sqlx::query_as::<_, DocumentoArchivo>(&sql)
            .bind(nuevo.nombre_original)
            .bind(nuevo.nombre_almacenado)
            .bind(nuevo.mime_type)
            .bind(nuevo.tamano)
            .bind(nuevo.sha256)
            .bind(nuevo.descripcion)
            .bind(documentacion_id)
            .bind(recurso_documentacion_id)
            .bind(entidad_documentacion_id)
            .bind(nuevo.subido_por)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(archivo)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<DocumentoArchivo>, AppError> {
        let sql = format!("SELECT {COLUMNS} FROM documento_archivos WHERE id = $1");

        let archivo = sqlx::query_as::<_, DocumentoArchivo>(&sql)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(archivo)
    }

    async fn list_by_owner(&self, owner: ArchivoOwner) -> Result<Vec<DocumentoArchivo>, AppError> {
        let (documentacion_id, recurso_documentacion_id, entidad_documentacion_id) = owner.ids();

        let sql = format!(
            r#"
            SELECT {COLUMNS}
            FROM documento_archivos
            WHERE documentacion_id IS NOT DISTINCT FROM $1
              AND recurso_documentacion_id IS NOT DISTINCT FROM $2
              AND entidad_documentacion_id IS NOT DISTINCT FROM $3
            ORDER BY created_at DESC, id DESC
            "#
        );

        let rows = sqlx::query_as::<_, DocumentoArchivo>(&sql)
            .bind(documentacion_id)
            .bind(recurso_documentacion_id)
            .bind(entidad_documentacion_id)
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM documento_archivos WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn owner_exists(&self, owner: ArchivoOwner) -> Result<bool, AppError> {
        let (sql, id) = match owner {
            ArchivoOwner::Documentacion(id) => {
                ("SELECT EXISTS (SELECT 1 FROM documentacion WHERE id = $1)", id)
            }
            ArchivoOwner::RecursoDocumentacion(id) => (
                "SELECT EXISTS (SELECT 1 FROM recurso_documentacion WHERE id = $1)",
                id,
            ),
            ArchivoOwner::EntidadDocumentacion(id) => (
                "SELECT EXISTS (SELECT 1 FROM entidad_documentacion WHERE id = $1)",
                id,
            ),
        };

        let exists: bool = sqlx::query_scalar(sql)
            .bind(id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(exists)
    }
}
