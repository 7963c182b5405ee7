//! Documentation assignments (recurso/entidad ↔ documentacion) and
//! entidad ↔ recurso links.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::domain::vencimiento::derive_fecha_vencimiento;

/// Who holds an assigned document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoAsignacion {
    Recurso,
    Entidad,
    Universal,
}

impl TipoAsignacion {
    pub fn as_str(&self) -> &'static str {
        match self {
            TipoAsignacion::Recurso => "recurso",
            TipoAsignacion::Entidad => "entidad",
            TipoAsignacion::Universal => "universal",
        }
    }
}

impl TryFrom<String> for TipoAsignacion {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "recurso" => Ok(TipoAsignacion::Recurso),
            "entidad" => Ok(TipoAsignacion::Entidad),
            "universal" => Ok(TipoAsignacion::Universal),
            other => Err(format!("unknown tipo de asignacion '{other}'")),
        }
    }
}

/// A documentacion assigned to a recurso or an entidad, joined with the
/// documentacion and estado it references.
///
/// `titular_id` is the recurso id or the entidad id. The entidad-only flags
/// are always `false` for recurso assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Asignacion {
    pub id: i64,
    pub titular_id: i64,
    pub documentacion_id: i64,
    pub documentacion_codigo: String,
    pub documentacion_descripcion: String,
    pub dias_anticipacion: i32,
    pub fecha_emision: Option<NaiveDate>,
    pub fecha_tramitacion: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub estado_id: Option<i64>,
    pub estado_nombre: Option<String>,
    pub estado_color: Option<String>,
    pub estado_nivel: Option<i32>,
    pub observaciones: Option<String>,
    pub es_inhabilitante: bool,
    pub notificar_email: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Asignacion {
    pub fn valores(&self) -> AsignacionValores {
        AsignacionValores {
            fecha_emision: self.fecha_emision,
            fecha_tramitacion: self.fecha_tramitacion,
            fecha_vencimiento: self.fecha_vencimiento,
            estado_id: self.estado_id,
            observaciones: self.observaciones.clone(),
        }
    }

    pub fn flags(&self) -> EntidadDocFlags {
        EntidadDocFlags {
            es_inhabilitante: self.es_inhabilitante,
            notificar_email: self.notificar_email,
        }
    }
}

/// Writable columns shared by recurso and entidad assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AsignacionValores {
    pub fecha_emision: Option<NaiveDate>,
    pub fecha_tramitacion: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub estado_id: Option<i64>,
    pub observaciones: Option<String>,
}

impl AsignacionValores {
    /// Builds the values of a new assignment. An explicit expiration date
    /// wins over the one derived from `fecha_emision + dias_vigencia`.
    pub fn nueva(input: &NuevaAsignacion, dias_vigencia: i32) -> Self {
        let fecha_vencimiento = input
            .fecha_vencimiento
            .or_else(|| derive_fecha_vencimiento(input.fecha_emision, dias_vigencia));

        Self {
            fecha_emision: input.fecha_emision,
            fecha_tramitacion: input.fecha_tramitacion,
            fecha_vencimiento,
            estado_id: input.estado_id,
            observaciones: input.observaciones.clone(),
        }
    }
}

/// Entidad-only assignment flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntidadDocFlags {
    pub es_inhabilitante: bool,
    pub notificar_email: bool,
}

/// Request to assign a documentacion.
#[derive(Debug, Clone, Default)]
pub struct NuevaAsignacion {
    pub documentacion_id: i64,
    pub fecha_emision: Option<NaiveDate>,
    pub fecha_tramitacion: Option<NaiveDate>,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub estado_id: Option<i64>,
    pub observaciones: Option<String>,
    pub flags: EntidadDocFlags,
}

/// Partial update of an assignment; `Some(None)` clears a column.
#[derive(Debug, Clone, Default)]
pub struct AsignacionPatch {
    pub fecha_emision: Option<Option<NaiveDate>>,
    pub fecha_tramitacion: Option<Option<NaiveDate>>,
    pub fecha_vencimiento: Option<Option<NaiveDate>>,
    pub estado_id: Option<Option<i64>>,
    pub observaciones: Option<Option<String>>,
    pub es_inhabilitante: Option<bool>,
    pub notificar_email: Option<bool>,
}

impl AsignacionPatch {
    /// Returns true when the caller set the estado explicitly.
    pub fn sets_estado(&self) -> bool {
        self.estado_id.is_some()
    }

    /// Applies the patch. A new emission date without an explicit expiration
    /// date re-derives the expiration from `dias_vigencia`.
    pub fn apply(&self, mut current: AsignacionValores, dias_vigencia: i32) -> AsignacionValores {
        if let Some(v) = self.fecha_emision {
            current.fecha_emision = v;
        }
        if let Some(v) = self.fecha_tramitacion {
            current.fecha_tramitacion = v;
        }
        if let Some(v) = self.estado_id {
            current.estado_id = v;
        }
        if let Some(v) = &self.observaciones {
            current.observaciones = v.clone();
        }

        match self.fecha_vencimiento {
            Some(v) => current.fecha_vencimiento = v,
            None if self.fecha_emision.is_some() => {
                if let Some(derived) =
                    derive_fecha_vencimiento(current.fecha_emision, dias_vigencia)
                {
                    current.fecha_vencimiento = Some(derived);
                }
            }
            None => {}
        }

        current
    }

    pub fn apply_flags(&self, mut current: EntidadDocFlags) -> EntidadDocFlags {
        if let Some(v) = self.es_inhabilitante {
            current.es_inhabilitante = v;
        }
        if let Some(v) = self.notificar_email {
            current.notificar_email = v;
        }
        current
    }
}

/// An entidad ↔ recurso link joined with both sides' display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Vinculo {
    pub id: i64,
    pub entidad_id: i64,
    pub razon_social: String,
    pub recurso_id: i64,
    pub recurso_codigo: String,
    pub recurso_apellido: String,
    pub recurso_nombre: String,
    pub recurso_fecha_baja: Option<NaiveDate>,
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub observaciones: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vinculo {
    /// A link is active while it has no end date or the end date is today
    /// or later.
    pub fn is_activo(&self, today: NaiveDate) -> bool {
        self.fecha_fin.is_none_or(|fin| fin >= today)
    }

    /// Active link whose recurso has not been dado de baja.
    pub fn recurso_vigente(&self, today: NaiveDate) -> bool {
        self.recurso_fecha_baja.is_none() && self.is_activo(today)
    }

    pub fn valores(&self) -> VinculoValores {
        VinculoValores {
            fecha_inicio: self.fecha_inicio,
            fecha_fin: self.fecha_fin,
            observaciones: self.observaciones.clone(),
        }
    }
}

/// Writable columns of an entidad ↔ recurso link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VinculoValores {
    pub fecha_inicio: NaiveDate,
    pub fecha_fin: Option<NaiveDate>,
    pub observaciones: Option<String>,
}

impl VinculoValores {
    pub fn fechas_validas(&self) -> bool {
        self.fecha_fin.is_none_or(|fin| fin >= self.fecha_inicio)
    }
}

/// Partial update of a link.
#[derive(Debug, Clone, Default)]
pub struct VinculoPatch {
    pub fecha_inicio: Option<NaiveDate>,
    pub fecha_fin: Option<Option<NaiveDate>>,
    pub observaciones: Option<Option<String>>,
}

impl VinculoPatch {
    pub fn apply(self, mut current: VinculoValores) -> VinculoValores {
        if let Some(v) = self.fecha_inicio {
            current.fecha_inicio = v;
        }
        if let Some(v) = self.fecha_fin {
            current.fecha_fin = v;
        }
        if let Some(v) = self.observaciones {
            current.observaciones = v;
        }
        current
    }
}
