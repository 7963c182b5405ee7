//! DTOs for authentication endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Usuario;
use crate::utils::validation::USERNAME_REGEX;

/// Request body for `POST /api/auth/login`. `username` also accepts the e-mail.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub usuario: Usuario,
}

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
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
}

/// Request body for `PUT /api/auth/password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub password_actual: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password_nuevo: String,
}
