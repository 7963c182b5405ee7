//! Handlers for documentation assigned to recursos and entidades.
//!
//! Both holder kinds share the same service; each route fixes the
//! [`TipoAsignacion`].

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::asignacion::{CreateAsignacionRequest, UpdateAsignacionRequest};
use crate::application::services::asignacion_service::AsignacionDetalle;
use crate::domain::entities::TipoAsignacion;
use crate::domain::vencimiento::today;
use crate::error::AppError;
use crate::state::AppState;

async fn list(
    state: &AppState,
    tipo: TipoAsignacion,
    titular_id: i64,
) -> Result<Json<Vec<AsignacionDetalle>>, AppError> {
    let items = state
        .asignacion_service
        .list(tipo, titular_id, today())
        .await?;
    Ok(Json(items))
}

async fn create(
    state: &AppState,
    tipo: TipoAsignacion,
    titular_id: i64,
    payload: CreateAsignacionRequest,
) -> Result<(StatusCode, Json<AsignacionDetalle>), AppError> {
    payload.validate()?;

    let asignacion = state
        .asignacion_service
        .create(tipo, titular_id, payload.into(), today())
        .await?;

    Ok((StatusCode::CREATED, Json(asignacion)))
}

async fn update(
    state: &AppState,
    tipo: TipoAsignacion,
    id: i64,
    payload: UpdateAsignacionRequest,
) -> Result<Json<AsignacionDetalle>, AppError> {
    payload.validate()?;

    let asignacion = state
        .asignacion_service
        .update(tipo, id, payload.into(), today())
        .await?;

    Ok(Json(asignacion))
}

/// # Endpoint
///
/// `GET /api/recursos/{id}/documentacion`
pub async fn recurso_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AsignacionDetalle>>, AppError> {
    list(&state, TipoAsignacion::Recurso, id).await
}

/// Assigns a document type to a recurso. Without `estado_id` the estado is
/// computed from the dates right away.
///
/// # Endpoint
///
/// `POST /api/recursos/{id}/documentacion`
///
/// # Errors
///
/// Returns 409 if the recurso already has the documentacion.
pub async fn create_recurso_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CreateAsignacionRequest>,
) -> Result<(StatusCode, Json<AsignacionDetalle>), AppError> {
    create(&state, TipoAsignacion::Recurso, id, payload).await
}

/// # Endpoint
///
/// `PUT /api/recursos/documentacion/{id}`
pub async fn update_recurso_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateAsignacionRequest>,
) -> Result<Json<AsignacionDetalle>, AppError> {
    update(&state, TipoAsignacion::Recurso, id, payload).await
}

/// # Endpoint
///
/// `DELETE /api/recursos/documentacion/{id}`
pub async fn delete_recurso_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state
        .asignacion_service
        .delete(TipoAsignacion::Recurso, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # Endpoint
///
/// `GET /api/entidades/{id}/documentacion`
pub async fn entidad_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<AsignacionDetalle>>, AppError> {
    list(&state, TipoAsignacion::Entidad, id).await
}

/// # Endpoint
///
/// `POST /api/entidades/{id}/documentacion`
pub async fn create_entidad_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CreateAsignacionRequest>,
) -> Result<(StatusCode, Json<AsignacionDetalle>), AppError> {
    create(&state, TipoAsignacion::Entidad, id, payload).await
}

/// # Endpoint
///
/// `PUT /api/entidades/documentacion/{id}`
pub async fn update_entidad_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateAsignacionRequest>,
) -> Result<Json<AsignacionDetalle>, AppError> {
    update(&state, TipoAsignacion::Entidad, id, payload).await
}

/// # Endpoint
///
/// `DELETE /api/entidades/documentacion/{id}`
pub async fn delete_entidad_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state
        .asignacion_service
        .delete(TipoAsignacion::Entidad, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
