//! DTOs for entidades and their recurso links.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{EntidadValores, UpdateEntidad, VinculoPatch, VinculoValores};
use crate::utils::validation::validate_cuit;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEntidadRequest {
    #[validate(length(min = 1, max = 255))]
    pub razon_social: String,

    #[validate(custom(function = "validate_cuit"))]
    pub cuit: Option<String>,

    pub domicilio: Option<String>,
    pub telefono: Option<String>,
    pub localidad: Option<String>,

    #[validate(email(message = "Invalid e-mail address"))]
    pub email: Option<String>,

    #[validate(url(message = "Invalid URL format"))]
    pub url_plataforma: Option<String>,

    pub observaciones: Option<String>,
}

impl From<CreateEntidadRequest> for EntidadValores {
    fn from(r: CreateEntidadRequest) -> Self {
        Self {
            razon_social: r.razon_social,
            cuit: r.cuit,
            domicilio: r.domicilio,
            telefono: r.telefono,
            localidad: r.localidad,
            email: r.email,
            url_plataforma: r.url_plataforma,
            observaciones: r.observaciones,
        }
    }
}

/// Nullable fields: absent = unchanged, `null` = clear.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEntidadRequest {
    #[validate(length(min = 1, max = 255))]
    pub razon_social: Option<String>,

    #[validate(custom(function = "validate_cuit"))]
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub cuit: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub domicilio: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub telefono: Option<Option<String>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub localidad: Option<Option<String>>,

    #[validate(email(message = "Invalid e-mail address"))]
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub email: Option<Option<String>>,

    #[validate(url(message = "Invalid URL format"))]
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub url_plataforma: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub observaciones: Option<Option<String>>,
}

impl From<UpdateEntidadRequest> for UpdateEntidad {
    fn from(r: UpdateEntidadRequest) -> Self {
        Self {
            razon_social: r.razon_social,
            cuit: r.cuit,
            domicilio: r.domicilio,
            telefono: r.telefono,
            localidad: r.localidad,
            email: r.email,
            url_plataforma: r.url_plataforma,
            observaciones: r.observaciones,
        }
    }
}

/// Request body for `POST /api/entidades/{id}/recursos`.
#[derive(Debug, Deserialize)]
pub struct CreateVinculoRequest {
    pub recurso_id: i64,
    /// Defaults to today.
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<NaiveDate>,
    pub observaciones: Option<String>,
}

impl CreateVinculoRequest {
    pub fn valores(&self, today: NaiveDate) -> VinculoValores {
        VinculoValores {
            fecha_inicio: self.fecha_inicio.unwrap_or(today),
            fecha_fin: self.fecha_fin,
            observaciones: self.observaciones.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateVinculoRequest {
    pub fecha_inicio: Option<NaiveDate>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub fecha_fin: Option<Option<NaiveDate>>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub observaciones: Option<Option<String>>,
}

impl From<UpdateVinculoRequest> for VinculoPatch {
    fn from(r: UpdateVinculoRequest) -> Self {
        Self {
            fecha_inicio: r.fecha_inicio,
            fecha_fin: r.fecha_fin,
            observaciones: r.observaciones,
        }
    }
}
