//! DTOs for document types.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{DocumentacionValores, UpdateDocumentacion};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocumentacionRequest {
    #[validate(length(min = 1, max = 50))]
    pub codigo: String,

    #[validate(length(min = 1, max = 255))]
    pub descripcion: String,

    #[validate(range(min = 1, max = 36500))]
    pub dias_vigencia: i32,

    #[validate(range(min = 0, max = 36500))]
    #[serde(default)]
    pub dias_anticipacion: i32,

    #[serde(default)]
    pub es_obligatorio: bool,

    #[serde(default)]
    pub es_universal: bool,

    pub estado_vencimiento_id: Option<i64>,
    pub estado_id: Option<i64>,
    pub fecha_emision: Option<NaiveDate>,
    pub fecha_tramitacion: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub observaciones: Option<String>,
}

impl From<CreateDocumentacionRequest> for DocumentacionValores {
    fn from(r: CreateDocumentacionRequest) -> Self {
        Self {
            codigo: r.codigo,
            descripcion: r.descripcion,
            dias_vigencia: r.dias_vigencia,
            dias_anticipacion: r.dias_anticipacion,
            es_obligatorio: r.es_obligatorio,
            es_universal: r.es_universal,
            estado_vencimiento_id: r.estado_vencimiento_id,
            estado_id: r.estado_id,
            fecha_emision: r.fecha_emision,
            fecha_tramitacion: r.fecha_tramitacion,
            fecha_vencimiento: r.fecha_vencimiento,
            observaciones: r.observaciones,
        }
    }
}

/// Nullable fields: absent = unchanged, `null` = clear.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDocumentacionRequest {
    #[validate(length(min = 1, max = 50))]
    pub codigo: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub descripcion: Option<String>,

    #[validate(range(min = 1, max = 36500))]
    pub dias_vigencia: Option<i32>,

    #[validate(range(min = 0, max = 36500))]
    pub dias_anticipacion: Option<i32>,

    pub es_obligatorio: Option<bool>,
    pub es_universal: Option<bool>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub estado_vencimiento_id: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub estado_id: Option<Option<i64>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub fecha_emision: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub fecha_tramitacion: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub fecha_vencimiento: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub observaciones: Option<Option<String>>,
}

impl From<UpdateDocumentacionRequest> for UpdateDocumentacion {
    fn from(r: UpdateDocumentacionRequest) -> Self {
        Self {
            codigo: r.codigo,
            descripcion: r.descripcion,
            dias_vigencia: r.dias_vigencia,
            dias_anticipacion: r.dias_anticipacion,
            es_obligatorio: r.es_obligatorio,
            es_universal: r.es_universal,
            estado_vencimiento_id: r.estado_vencimiento_id,
            estado_id: r.estado_id,
            fecha_emision: r.fecha_emision,
            fecha_tramitacion: r.fecha_tramitacion,
            fecha_vencimiento: r.fecha_vencimiento,
            observaciones: r.observaciones,
        }
    }
}
