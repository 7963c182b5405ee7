//! DTOs for document assignments.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{AsignacionPatch, EntidadDocFlags, NuevaAsignacion};

/// Request body for `POST /api/{recursos|entidades}/{id}/documentacion`.
///
/// The flags only apply to entidad assignments and are ignored otherwise.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAsignacionRequest {
    pub documentacion_id: i64,
    pub fecha_emision: Option<NaiveDate>,
    pub fecha_tramitacion: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub estado_id: Option<i64>,

    #[validate(length(max = 2000))]
    pub observaciones: Option<String>,

    #[serde(default)]
    pub es_inhabilitante: bool,
    #[serde(default)]
    pub notificar_email: bool,
}

impl From<CreateAsignacionRequest> for NuevaAsignacion {
    fn from(r: CreateAsignacionRequest) -> Self {
        Self {
            documentacion_id: r.documentacion_id,
            fecha_emision: r.fecha_emision,
            fecha_tramitacion: r.fecha_tramitacion,
            fecha_vencimiento: r.fecha_vencimiento,
            estado_id: r.estado_id,
            observaciones: r.observaciones,
            flags: EntidadDocFlags {
                es_inhabilitante: r.es_inhabilitante,
                notificar_email: r.notificar_email,
            },
        }
    }
}

/// Nullable fields: absent = unchanged, `null` = clear.
///
/// A new `fecha_emision` without `fecha_vencimiento` re-derives the
/// expiration date. Without `estado_id` the estado is recomputed.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateAsignacionRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub fecha_emision: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub fecha_tramitacion: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub fecha_vencimiento: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub estado_id: Option<Option<i64>>,

    #[validate(length(max = 2000))]
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub observaciones: Option<Option<String>>,

    pub es_inhabilitante: Option<bool>,
    pub notificar_email: Option<bool>,
}

impl From<UpdateAsignacionRequest> for AsignacionPatch {
    fn from(r: UpdateAsignacionRequest) -> Self {
        Self {
            fecha_emision: r.fecha_emision,
            fecha_tramitacion: r.fecha_tramitacion,
            fecha_vencimiento: r.fecha_vencimiento,
            estado_id: r.estado_id,
            observaciones: r.observaciones,
            es_inhabilitante: r.es_inhabilitante,
            notificar_email: r.notificar_email,
        }
    }
}
