//! Documentacion entity: the definition of a required document type.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// A document type that can be required from recursos and entidades.
///
/// `dias_vigencia` is the validity period counted from the emission date and
/// `dias_anticipacion` the warning window before expiration. Universal
/// documents carry their own dates and estado, shared by everyone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Documentacion {
    pub id: i64,
    pub codigo: String,
    pub descripcion: String,
    pub dias_vigencia: i32,
    pub dias_anticipacion: i32,
    pub es_obligatorio: bool,
    pub es_universal: bool,
    pub estado_vencimiento_id: Option<i64>,
    pub estado_id: Option<i64>,
    pub fecha_emision: Option<NaiveDate>,
    pub fecha_tramitacion: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub observaciones: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Complete set of writable columns, used for both insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentacionValores {
    pub codigo: String,
    pub descripcion: String,
    pub dias_vigencia: i32,
    pub dias_anticipacion: i32,
    pub es_obligatorio: bool,
    pub es_universal: bool,
    pub estado_vencimiento_id: Option<i64>,
    pub estado_id: Option<i64>,
    pub fecha_emision: Option<NaiveDate>,
    pub fecha_tramitacion: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub observaciones: Option<String>,
}

impl From<&Documentacion> for DocumentacionValores {
    fn from(d: &Documentacion) -> Self {
        Self {
            codigo: d.codigo.clone(),
            descripcion: d.descripcion.clone(),
            dias_vigencia: d.dias_vigencia,
            dias_anticipacion: d.dias_anticipacion,
            es_obligatorio: d.es_obligatorio,
            es_universal: d.es_universal,
            estado_vencimiento_id: d.estado_vencimiento_id,
            estado_id: d.estado_id,
            fecha_emision: d.fecha_emision,
            fecha_tramitacion: d.fecha_tramitacion,
            fecha_vencimiento: d.fecha_vencimiento,
            observaciones: d.observaciones.clone(),
        }
    }
}

/// Partial update; nullable columns use `Option<Option<_>>` so that
/// `Some(None)` clears them.
#[derive(Debug, Clone, Default)]
pub struct UpdateDocumentacion {
    pub codigo: Option<String>,
    pub descripcion: Option<String>,
    pub dias_vigencia: Option<i32>,
    pub dias_anticipacion: Option<i32>,
    pub es_obligatorio: Option<bool>,
    pub es_universal: Option<bool>,
    pub estado_vencimiento_id: Option<Option<i64>>,
    pub estado_id: Option<Option<i64>>,
    pub fecha_emision: Option<Option<NaiveDate>>,
    pub fecha_tramitacion: Option<Option<NaiveDate>>,
    pub fecha_vencimiento: Option<Option<NaiveDate>>,
    pub observaciones: Option<Option<String>>,
}

impl UpdateDocumentacion {
    /// Applies the patch on top of the current values.
    pub fn apply(self, mut current: DocumentacionValores) -> DocumentacionValores {
        if let Some(v) = self.codigo {
            current.codigo = v;
        }
        if let Some(v) = self.descripcion {
            current.descripcion = v;
        }
        if let Some(v) = self.dias_vigencia {
            current.dias_vigencia = v;
        }
        if let Some(v) = self.dias_anticipacion {
            current.dias_anticipacion = v;
        }
        if let Some(v) = self.es_obligatorio {
            current.es_obligatorio = v;
        }
        if let Some(v) = self.es_universal {
            current.es_universal = v;
        }
        if let Some(v) = self.estado_vencimiento_id {
            current.estado_vencimiento_id = v;
        }
        if let Some(v) = self.estado_id {
            current.estado_id = v;
        }
        if let Some(v) = self.fecha_emision {
            current.fecha_emision = v;
        }
        if let Some(v) = self.fecha_tramitacion {
            current.fecha_tramitacion = v;
        }
        if let Some(v) = self.fecha_vencimiento {
            current.fecha_vencimiento = v;
        }
        if let Some(v) = self.observaciones {
            current.observaciones = v;
        }
        current
    }
}
