//! Recurso entity: a person that can be assigned documentation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// A person tracked by the system.
///
/// A recurso is "dado de baja" (soft-deleted) once `fecha_baja` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Recurso {
    pub id: i64,
    pub codigo: String,
    pub apellido: String,
    pub nombre: String,
    pub telefono: Option<String>,
    pub cuil: Option<String>,
    pub direccion: Option<String>,
    pub localidad: Option<String>,
    pub observaciones: Option<String>,
    pub fecha_alta: NaiveDate,
    pub fecha_baja: Option<NaiveDate>,
    pub estado_id: Option<i64>,
    pub created_by: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recurso {
    /// Returns true if the recurso has been dado de baja.
    pub fn is_baja(&self) -> bool {
        self.fecha_baja.is_some()
    }

    pub fn nombre_completo(&self) -> String {
        format!("{}, {}", self.apellido, self.nombre)
    }
}

/// Complete set of writable columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecursoValores {
    pub codigo: String,
    pub apellido: String,
    pub nombre: String,
    pub telefono: Option<String>,
    pub cuil: Option<String>,
    pub direccion: Option<String>,
    pub localidad: Option<String>,
    pub observaciones: Option<String>,
    pub fecha_alta: NaiveDate,
    pub fecha_baja: Option<NaiveDate>,
    pub estado_id: Option<i64>,
}

impl From<&Recurso> for RecursoValores {
    fn from(r: &Recurso) -> Self {
        Self {
            codigo: r.codigo.clone(),
            apellido: r.apellido.clone(),
            nombre: r.nombre.clone(),
            telefono: r.telefono.clone(),
            cuil: r.cuil.clone(),
            direccion: r.direccion.clone(),
            localidad: r.localidad.clone(),
            observaciones: r.observaciones.clone(),
            fecha_alta: r.fecha_alta,
            fecha_baja: r.fecha_baja,
            estado_id: r.estado_id,
        }
    }
}

/// Partial update. `fecha_baja: Some(None)` reactivates a recurso.
#[derive(Debug, Clone, Default)]
pub struct UpdateRecurso {
    pub codigo: Option<String>,
    pub apellido: Option<String>,
    pub nombre: Option<String>,
    pub telefono: Option<Option<String>>,
    pub cuil: Option<Option<String>>,
    pub direccion: Option<Option<String>>,
    pub localidad: Option<Option<String>>,
    pub observaciones: Option<Option<String>>,
    pub fecha_alta: Option<NaiveDate>,
    pub fecha_baja: Option<Option<NaiveDate>>,
    pub estado_id: Option<Option<i64>>,
}

impl UpdateRecurso {
    /// Applies the patch on top of the current values.
    pub fn apply(self, mut current: RecursoValores) -> RecursoValores {
        if let Some(v) = self.codigo {
            current.codigo = v;
        }
        if let Some(v) = self.apellido {
            current.apellido = v;
        }
        if let Some(v) = self.nombre {
            current.nombre = v;
        }
        if let Some(v) = self.telefono {
            current.telefono = v;
        }
        if let Some(v) = self.cuil {
            current.cuil = v;
        }
        if let Some(v) = self.direccion {
            current.direccion = v;
        }
        if let Some(v) = self.localidad {
            current.localidad = v;
        }
        if let Some(v) = self.observaciones {
            current.observaciones = v;
        }
        if let Some(v) = self.fecha_alta {
            current.fecha_alta = v;
        }
        if let Some(v) = self.fecha_baja {
            current.fecha_baja = v;
        }
        if let Some(v) = self.estado_id {
            current.estado_id = v;
        }
        current
    }
}
