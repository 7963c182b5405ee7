//! Usuario entity and the authenticated-user view derived from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

/// Access level of a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rol {
    Admin,
    Usuario,
}

impl Rol {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rol::Admin => "admin",
            Rol::Usuario => "usuario",
        }
    }
}

impl fmt::Display for Rol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Rol::Admin),
            "usuario" => Ok(Rol::Usuario),
            other => Err(format!("unknown rol '{other}'")),
        }
    }
}

impl TryFrom<String> for Rol {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A user account. The password hash is never serialized.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Usuario {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub nombre: String,
    pub apellido: String,
    #[sqlx(try_from = "String")]
    pub rol: Rol,
    pub activo: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Usuario {
    pub fn is_admin(&self) -> bool {
        self.rol == Rol::Admin
    }
}

/// Input data for creating a user. `password_hash` is already hashed.
#[derive(Debug, Clone)]
pub struct NewUsuario {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub nombre: String,
    pub apellido: String,
    pub rol: Rol,
}

/// Partial update; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateUsuario {
    pub email: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub rol: Option<Rol>,
    pub activo: Option<bool>,
    pub password_hash: Option<String>,
}

/// The user a request is authenticated as.
///
/// Inserted into request extensions by the bearer-token middleware.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub rol: Rol,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.rol == Rol::Admin
    }

    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] unless the user has the admin role.
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden(
                "Administrator role required",
                json!({ "rol": self.rol }),
            ))
        }
    }
}

impl From<&Usuario> for CurrentUser {
    fn from(u: &Usuario) -> Self {
        Self {
            id: u.id,
            username: u.username.clone(),
            rol: u.rol,
        }
    }
}
