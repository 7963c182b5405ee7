//! DTOs for recursos.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};
use validator::Validate;

use super::pagination::PaginationParams;
use crate::domain::entities::{RecursoValores, UpdateRecurso};
use crate::utils::validation::validate_cuit;

/// Query parameters for `GET /api/recursos`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct RecursoListParams {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    /// Include recursos dados de baja.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub incluir_bajas: Option<bool>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateRecursoRequest {
    #[validate(length(min = 1, max = 50))]
    pub codigo: String,

    #[validate(length(min = 1, max = 100))]
    pub apellido: String,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[validate(length(max = 50))]
    pub telefono: Option<String>,

    #[validate(custom(function = "validate_cuit"))]
    pub cuil: Option<String>,

    pub direccion: Option<String>,
    pub localidad: Option<String>,
    pub observaciones: Option<String>,

    /// Defaults to today.
    pub fecha_alta: Option<NaiveDate>,

    pub estado_id: Option<i64>,
}

impl CreateRecursoRequest {
    pub fn into_valores(self, today: NaiveDate) -> RecursoValores {
        RecursoValores {
            codigo: self.codigo,
            apellido: self.apellido,
            nombre: self.nombre,
            telefono: self.telefono,
            cuil: self.cuil,
            direccion: self.direccion,
            localidad: self.localidad,
            observaciones: self.observaciones,
            fecha_alta: self.fecha_alta.unwrap_or(today),
            fecha_baja: None,
            estado_id: self.estado_id,
        }
    }
}

/// Nullable fields: absent = unchanged, `null` = clear.
/// `fecha_baja: null` reactivates a recurso dado de baja.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateRecursoRequest {
    #[validate(length(min = 1, max = 50))]
    pub codigo: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub apellido: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub telefono: Option<Option<String>>,

    #[validate(custom(function = "validate_cuit"))]
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub cuil: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub direccion: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub localidad: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub observaciones: Option<Option<String>>,

    pub fecha_alta: Option<NaiveDate>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub fecha_baja: Option<Option<NaiveDate>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub estado_id: Option<Option<i64>>,
}

impl From<UpdateRecursoRequest> for UpdateRecurso {
    fn from(r: UpdateRecursoRequest) -> Self {
        Self {
            codigo: r.codigo,
            apellido: r.apellido,
            nombre: r.nombre,
            telefono: r.telefono,
            cuil: r.cuil,
            direccion: r.direccion,
            localidad: r.localidad,
            observaciones: r.observaciones,
            fecha_alta: r.fecha_alta,
            fecha_baja: r.fecha_baja,
            estado_id: r.estado_id,
        }
    }
}
