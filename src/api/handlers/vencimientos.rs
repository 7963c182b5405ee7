//! Manual trigger of the expiration recomputation.

use axum::{Extension, Json, extract::State};
use tracing::info;

use crate::application::services::vencimiento_service::RecalculoResumen;
use crate::domain::entities::CurrentUser;
use crate::domain::vencimiento::today;
use crate::error::AppError;
use crate::state::AppState;

/// Recomputes the estado of every document with an expiration date, the
/// same work the background worker does on its interval.
///
/// # Endpoint
///
/// `POST /api/vencimientos/recalcular` (admin)
pub async fn recalcular_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<RecalculoResumen>, AppError> {
    info!(user_id = user.id, "Manual expiration recomputation requested");
    Ok(Json(state.vencimiento_service.recalcular(today()).await?))
}
