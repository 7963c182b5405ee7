//! Estado entity: a status label with a color and a criticality level.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A status label assigned to documents and resources.
///
/// `nivel` ranges from 1 to 10; a higher value is more critical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow)]
pub struct Estado {
    pub id: i64,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub color: String,
    pub nivel: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating an estado.
#[derive(Debug, Clone)]
pub struct NewEstado {
    pub nombre: String,
    pub descripcion: Option<String>,
    pub color: String,
    pub nivel: i32,
}

/// Partial update. `descripcion: Some(None)` clears the description.
#[derive(Debug, Clone, Default)]
pub struct UpdateEstado {
    pub nombre: Option<String>,
    pub descripcion: Option<Option<String>>,
    pub color: Option<String>,
    pub nivel: Option<i32>,
}
