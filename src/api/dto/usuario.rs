//! DTOs for user administration.

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::Rol;
use crate::utils::validation::USERNAME_REGEX;

/// Request body for `POST /api/usuarios`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsuarioRequest {
    #[validate(length(min = 3, max = 50))]
    #[validate(regex(path = "*USERNAME_REGEX", message = "Only letters, digits, '.', '_' and '-'"))]
    pub username: String,

    #[validate(email(message = "Invalid e-mail address"))]
    pub email: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100))]
    pub nombre: String,

    #[validate(length(min = 1, max = 100))]
    pub apellido: String,

    /// Defaults to `usuario`.
    pub rol: Option<Rol>,
}

/// Request body for `PUT /api/usuarios/{id}`. Absent fields are unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsuarioRequest {
    #[validate(email(message = "Invalid e-mail address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub nombre: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub apellido: Option<String>,

    pub rol: Option<Rol>,

    pub activo: Option<bool>,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,
}
