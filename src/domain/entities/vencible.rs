//! Read models used by the expiration job, the dashboard and reports.

use chrono::NaiveDate;
use serde::Serialize;

use super::asignacion::TipoAsignacion;

/// The minimum needed to recompute the estado of one document.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct DocumentoVencible {
    #[sqlx(try_from = "String")]
    pub tipo: TipoAsignacion,
    pub id: i64,
    pub fecha_vencimiento: Option<NaiveDate>,
    pub dias_anticipacion: i32,
    pub estado_id: Option<i64>,
    pub estado_vencimiento_id: Option<i64>,
}

/// A document with an expiration date, with the holder's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct VencimientoItem {
    #[sqlx(try_from = "String")]
    pub tipo: TipoAsignacion,
    pub asignacion_id: i64,
    pub titular_id: Option<i64>,
    pub titular: String,
    pub documentacion_id: i64,
    pub documentacion_codigo: String,
    pub fecha_vencimiento: NaiveDate,
    pub dias_anticipacion: i32,
    pub estado_id: Option<i64>,
    pub estado_nombre: Option<String>,
    pub estado_color: Option<String>,
}

/// Date-range filter for expiration listings. Bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VencimientoFilter {
    pub desde: Option<NaiveDate>,
    pub hasta: Option<NaiveDate>,
    pub entidad_id: Option<i64>,
}

/// Number of assignments per estado.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct EstadoConteo {
    pub estado_id: Option<i64>,
    pub nombre: Option<String>,
    pub color: Option<String>,
    pub nivel: Option<i32>,
    pub cantidad: i64,
}

/// Headline counts for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Totales {
    pub recursos_activos: i64,
    pub entidades: i64,
    pub documentaciones: i64,
}
