//! Entidad entity: an organization that requires documentation.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// An organization. Soft-deleted once `deleted_at` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Entidad {
    pub id: i64,
    pub razon_social: String,
    pub cuit: Option<String>,
    pub domicilio: Option<String>,
    pub telefono: Option<String>,
    pub localidad: Option<String>,
    pub email: Option<String>,
    pub url_plataforma: Option<String>,
    pub observaciones: Option<String>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Entidad {
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Complete set of writable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntidadValores {
    pub razon_social: String,
    pub cuit: Option<String>,
    pub domicilio: Option<String>,
    pub telefono: Option<String>,
    pub localidad: Option<String>,
    pub email: Option<String>,
    pub url_plataforma: Option<String>,
    pub observaciones: Option<String>,
}

impl From<&Entidad> for EntidadValores {
    fn from(e: &Entidad) -> Self {
        Self {
            razon_social: e.razon_social.clone(),
            cuit: e.cuit.clone(),
            domicilio: e.domicilio.clone(),
            telefono: e.telefono.clone(),
            localidad: e.localidad.clone(),
            email: e.email.clone(),
            url_plataforma: e.url_plataforma.clone(),
            observaciones: e.observaciones.clone(),
        }
    }
}

/// Partial update; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct UpdateEntidad {
    pub razon_social: Option<String>,
    pub cuit: Option<Option<String>>,
    pub domicilio: Option<Option<String>>,
    pub telefono: Option<Option<String>>,
    pub localidad: Option<Option<String>>,
    pub email: Option<Option<String>>,
    pub url_plataforma: Option<Option<String>>,
    pub observaciones: Option<Option<String>>,
}

impl UpdateEntidad {
    /// Applies the patch on top of the current values.
    pub fn apply(self, mut current: EntidadValores) -> EntidadValores {
        if let Some(v) = self.razon_social {
            current.razon_social = v;
        }
        if let Some(v) = self.cuit {
            current.cuit = v;
        }
        if let Some(v) = self.domicilio {
            current.domicilio = v;
        }
        if let Some(v) = self.telefono {
            current.telefono = v;
        }
        if let Some(v) = self.localidad {
            current.localidad = v;
        }
        if let Some(v) = self.email {
            current.email = v;
        }
        if let Some(v) = self.url_plataforma {
            current.url_plataforma = v;
        }
        if let Some(v) = self.observaciones {
            current.observaciones = v;
        }
        current
    }
}
