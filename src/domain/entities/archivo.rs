//! DocumentoArchivo entity: a file attached to a document.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// What an attachment belongs to. Exactly one owner per file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchivoOwner {
    Documentacion(i64),
    RecursoDocumentacion(i64),
    EntidadDocumentacion(i64),
}

impl ArchivoOwner {
    /// Builds an owner from the three optional ids a request may carry.
    ///
    /// Returns `None` unless exactly one of them is set.
    pub fn from_ids(
        documentacion_id: Option<i64>,
        recurso_documentacion_id: Option<i64>,
        entidad_documentacion_id: Option<i64>,
    ) -> Option<Self> {
        match (
            documentacion_id,
            recurso_documentacion_id,
            entidad_documentacion_id,
        ) {
            (Some(id), None, None) => Some(ArchivoOwner::Documentacion(id)),
            (None, Some(id), None) => Some(ArchivoOwner::RecursoDocumentacion(id)),
            (None, None, Some(id)) => Some(ArchivoOwner::EntidadDocumentacion(id)),
            _ => None,
        }
    }

    /// `(documentacion_id, recurso_documentacion_id, entidad_documentacion_id)`
    pub fn ids(&self) -> (Option<i64>, Option<i64>, Option<i64>) {
        match *self {
            ArchivoOwner::Documentacion(id) => (Some(id), None, None),
            ArchivoOwner::RecursoDocumentacion(id) => (None, Some(id), None),
            ArchivoOwner::EntidadDocumentacion(id) => (None, None, Some(id)),
        }
    }
}

/// Metadata of a stored attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct DocumentoArchivo {
    pub id: i64,
    pub nombre_original: String,
    #[serde(skip_serializing)]
    pub nombre_almacenado: String,
    pub mime_type: String,
    pub tamano: i64,
    pub sha256: String,
    pub descripcion: Option<String>,
    pub documentacion_id: Option<i64>,
    pub recurso_documentacion_id: Option<i64>,
    pub entidad_documentacion_id: Option<i64>,
    pub subido_por: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Input data for recording an attachment after the bytes are stored.
#[derive(Debug, Clone)]
pub struct NewDocumentoArchivo {
    pub nombre_original: String,
    pub nombre_almacenado: String,
    pub mime_type: String,
    pub tamano: i64,
    pub sha256: String,
    pub descripcion: Option<String>,
    pub owner: ArchivoOwner,
    pub subido_por: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_requires_exactly_one_id() {
        assert_eq!(
            ArchivoOwner::from_ids(None, Some(4), None),
            Some(ArchivoOwner::RecursoDocumentacion(4))
        );
        assert_eq!(ArchivoOwner::from_ids(None, None, None), None);
        assert_eq!(ArchivoOwner::from_ids(Some(1), Some(2), None), None);
    }

    #[test]
    fn test_owner_ids() {
        assert_eq!(
            ArchivoOwner::EntidadDocumentacion(9).ids(),
            (None, None, Some(9))
        );
    }
}
