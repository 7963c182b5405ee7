//! Query parameters for dashboard and report endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::domain::entities::VencimientoFilter;

/// Query parameters for `GET /api/dashboard/vencimientos`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct VencimientosParams {
    /// Window in days, default 30, at most 3650.
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub dias: Option<u32>,

    /// Include already expired documents (default true).
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub incluir_vencidos: Option<bool>,
}

pub const MAX_DIAS: u32 = 3650;

/// Query parameters for `GET /api/reportes/vencimientos`.
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct ReporteVencimientosParams {
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub desde: Option<NaiveDate>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub hasta: Option<NaiveDate>,

    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub entidad_id: Option<i64>,
}

impl From<ReporteVencimientosParams> for VencimientoFilter {
    fn from(p: ReporteVencimientosParams) -> Self {
        Self {
            desde: p.desde,
            hasta: p.hasta,
            entidad_id: p.entidad_id,
        }
    }
}
