//! Expiration state computation.
//!
//! A document is `Vencido` the day after its expiration date, `PorVencer`
//! from `dias_anticipacion` days before it up to the expiration date itself,
//! and `Vigente` otherwise. Documents without an expiration date have no
//! computed state.

use chrono::{Days, Local, NaiveDate};
use serde::Serialize;

use crate::domain::entities::Estado;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Vigente,
    PorVencer,
    Vencido,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Vigente => "vigente",
            DocumentStatus::PorVencer => "por_vencer",
            DocumentStatus::Vencido => "vencido",
        }
    }
}

/// The current date in the server's local time zone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn compute_status(
    fecha_vencimiento: Option<NaiveDate>,
    dias_anticipacion: i32,
    today: NaiveDate,
) -> Option<DocumentStatus> {
    fecha_vencimiento.map(|fv| status_on(fv, dias_anticipacion, today))
}

/// Status of a document that has an expiration date.
pub fn status_on(
    fecha_vencimiento: NaiveDate,
    dias_anticipacion: i32,
    today: NaiveDate,
) -> DocumentStatus {
    if fecha_vencimiento < today {
        return DocumentStatus::Vencido;
    }

    let anticipacion = u64::try_from(dias_anticipacion).unwrap_or(0);

    match today.checked_add_days(Days::new(anticipacion)) {
        Some(limite) if fecha_vencimiento > limite => DocumentStatus::Vigente,
        _ => DocumentStatus::PorVencer,
    }
}

/// Days from `today` until `fecha_vencimiento`; negative once expired.
pub fn dias_restantes(fecha_vencimiento: NaiveDate, today: NaiveDate) -> i64 {
    (fecha_vencimiento - today).num_days()
}

/// `fecha_emision + dias_vigencia`, or `None` without an emission date.
pub fn derive_fecha_vencimiento(
    fecha_emision: Option<NaiveDate>,
    dias_vigencia: i32,
) -> Option<NaiveDate> {
    let dias = u64::try_from(dias_vigencia).ok()?;
    fecha_emision?.checked_add_days(Days::new(dias))
}

/// The estado with the highest `nivel`. Ties keep the first one seen.
pub fn most_critical<'a, I>(estados: I) -> Option<&'a Estado>
where
    I: IntoIterator<Item = &'a Estado>,
{
    estados.into_iter().fold(None, |best, e| match best {
        Some(b) if b.nivel >= e.nivel => Some(b),
        _ => Some(e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn estado(id: i64, nivel: i32) -> Estado {
        Estado {
            id,
            nombre: format!("E{id}"),
            descripcion: None,
            color: "#000000".to_string(),
            nivel,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_no_date_has_no_status() {
        assert_eq!(compute_status(None, 30, d(2025, 6, 1)), None);
    }

    #[test]
    fn test_expiration_day_is_not_vencido() {
        let today = d(2025, 6, 1);
        assert_eq!(
            compute_status(Some(today), 0, today),
            Some(DocumentStatus::PorVencer)
        );
        assert_eq!(
            compute_status(Some(d(2025, 5, 31)), 0, today),
            Some(DocumentStatus::Vencido)
        );
    }

    #[test]
    fn test_anticipation_window_is_inclusive() {
        let today = d(2025, 6, 1);
        assert_eq!(
            compute_status(Some(d(2025, 7, 1)), 30, today),
            Some(DocumentStatus::PorVencer)
        );
        assert_eq!(
            compute_status(Some(d(2025, 7, 2)), 30, today),
            Some(DocumentStatus::Vigente)
        );
    }

    #[test]
    fn test_negative_anticipation_counts_as_zero() {
        let today = d(2025, 6, 1);
        assert_eq!(
            compute_status(Some(d(2025, 6, 2)), -5, today),
            Some(DocumentStatus::Vigente)
        );
    }

    #[test]
    fn test_dias_restantes() {
        assert_eq!(dias_restantes(d(2025, 6, 11), d(2025, 6, 1)), 10);
        assert_eq!(dias_restantes(d(2025, 5, 30), d(2025, 6, 1)), -2);
    }

    #[test]
    fn test_derive_fecha_vencimiento() {
        assert_eq!(
            derive_fecha_vencimiento(Some(d(2024, 2, 28)), 2),
            Some(d(2024, 3, 1))
        );
        assert_eq!(derive_fecha_vencimiento(None, 30), None);
    }

    #[test]
    fn test_most_critical_prefers_first_on_tie() {
        let estados = [estado(1, 1), estado(2, 8), estado(3, 8), estado(4, 5)];
        assert_eq!(most_critical(&estados).map(|e| e.id), Some(2));
        assert!(most_critical(&[] as &[Estado]).is_none());
    }
}
