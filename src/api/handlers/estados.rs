//! Handlers for the estado catalogue.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::estado::{CreateEstadoRequest, UpdateEstadoRequest};
use crate::api::dto::pagination::{Paginated, PaginationParams};
use crate::domain::entities::Estado;
use crate::error::AppError;
use crate::state::AppState;

/// Lists estados ordered by nivel, then nombre.
///
/// # Endpoint
///
/// `GET /api/estados`
pub async fn estado_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Estado>>, AppError> {
    let query = params.to_list_query()?;

    let (items, total) = tokio::try_join!(
        state.estado_service.list(query.clone()),
        state.estado_service.count(query.search)
    )?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// # Endpoint
///
/// `GET /api/estados/{id}`
pub async fn get_estado_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Estado>, AppError> {
    Ok(Json(state.estado_service.get(id).await?))
}

/// # Endpoint
///
/// `POST /api/estados`
///
/// # Errors
///
/// Returns 409 if the nombre is taken.
pub async fn create_estado_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateEstadoRequest>,
) -> Result<(StatusCode, Json<Estado>), AppError> {
    payload.validate()?;
    let estado = state.estado_service.create(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(estado)))
}

/// # Endpoint
///
/// `PUT /api/estados/{id}`
pub async fn update_estado_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateEstadoRequest>,
) -> Result<Json<Estado>, AppError> {
    payload.validate()?;
    Ok(Json(state.estado_service.update(id, payload.into()).await?))
}

/// # Endpoint
///
/// `DELETE /api/estados/{id}`
///
/// # Errors
///
/// Returns 409 while any document, assignment or recurso references it.
pub async fn delete_estado_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.estado_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
