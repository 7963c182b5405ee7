//! Handlers for document types.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::documentacion::{CreateDocumentacionRequest, UpdateDocumentacionRequest};
use crate::api::dto::pagination::{Paginated, PaginationParams};
use crate::domain::entities::{CurrentUser, Documentacion};
use crate::domain::vencimiento::today;
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `GET /api/documentacion`
pub async fn documentacion_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Documentacion>>, AppError> {
    let query = params.to_list_query()?;

    let (items, total) = tokio::try_join!(
        state.documentacion_service.list(query.clone()),
        state.documentacion_service.count(query.search)
    )?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// # Endpoint
///
/// `GET /api/documentacion/{id}`
pub async fn get_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Documentacion>, AppError> {
    Ok(Json(state.documentacion_service.get(id).await?))
}

/// Creates a document type.
///
/// When `fecha_vencimiento` is omitted it is derived from
/// `fecha_emision + dias_vigencia`. Universal documents without an explicit
/// estado get the one matching their expiration status.
///
/// # Endpoint
///
/// `POST /api/documentacion`
pub async fn create_documentacion_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateDocumentacionRequest>,
) -> Result<(StatusCode, Json<Documentacion>), AppError> {
    payload.validate()?;

    let doc = state
        .documentacion_service
        .create(payload.into(), Some(user.id), today())
        .await?;

    Ok((StatusCode::CREATED, Json(doc)))
}

/// # Endpoint
///
/// `PUT /api/documentacion/{id}`
pub async fn update_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateDocumentacionRequest>,
) -> Result<Json<Documentacion>, AppError> {
    payload.validate()?;

    let doc = state
        .documentacion_service
        .update(id, payload.into(), today())
        .await?;

    Ok(Json(doc))
}

/// # Endpoint
///
/// `DELETE /api/documentacion/{id}`
///
/// # Errors
///
/// Returns 409 while the document type is assigned.
pub async fn delete_documentacion_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.documentacion_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
