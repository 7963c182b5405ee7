//! DTOs for the estado catalogue.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::{NewEstado, UpdateEstado};
use crate::utils::validation::COLOR_REGEX;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateEstadoRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    pub descripcion: Option<String>,

    #[validate(regex(path = "*COLOR_REGEX", message = "Color must be #RRGGBB"))]
    pub color: String,

    #[validate(range(min = 1, max = 10))]
    pub nivel: i32,
}

impl From<CreateEstadoRequest> for NewEstado {
    fn from(r: CreateEstadoRequest) -> Self {
        Self {
            nombre: r.nombre,
            descripcion: r.descripcion,
            color: r.color,
            nivel: r.nivel,
        }
    }
}

/// `descripcion: null` clears the description; absent leaves it unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateEstadoRequest {
    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub descripcion: Option<Option<String>>,

    #[validate(regex(path = "*COLOR_REGEX", message = "Color must be #RRGGBB"))]
    pub color: Option<String>,

    #[validate(range(min = 1, max = 10))]
    pub nivel: Option<i32>,
}

impl From<UpdateEstadoRequest> for UpdateEstado {
    fn from(r: UpdateEstadoRequest) -> Self {
        Self {
            nombre: r.nombre,
            descripcion: r.descripcion,
            color: r.color,
            nivel: r.nivel,
        }
    }
}
