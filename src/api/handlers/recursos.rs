//! Handlers for recursos (people whose documentation is tracked).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::Paginated;
use crate::api::dto::recurso::{CreateRecursoRequest, RecursoListParams, UpdateRecursoRequest};
use crate::domain::entities::{CurrentUser, Estado, Recurso, TipoAsignacion, Vinculo};
use crate::domain::vencimiento::today;
use crate::error::AppError;
use crate::state::AppState;

/// Lists recursos. Recursos dados de baja are hidden unless
/// `incluir_bajas=true`.
///
/// # Endpoint
///
/// `GET /api/recursos?page=1&page_size=25&search=perez&incluir_bajas=false`
pub async fn recurso_list_handler(
    State(state): State<AppState>,
    Query(params): Query<RecursoListParams>,
) -> Result<Json<Paginated<Recurso>>, AppError> {
    let query = params.pagination.to_list_query()?;
    let incluir_bajas = params.incluir_bajas.unwrap_or(false);

    let (items, total) = tokio::try_join!(
        state.recurso_service.list(query.clone(), incluir_bajas),
        state.recurso_service.count(query.search, incluir_bajas)
    )?;

    Ok(Json(Paginated::new(items, &params.pagination, total)))
}

/// # Endpoint
///
/// `GET /api/recursos/{id}`
pub async fn get_recurso_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Recurso>, AppError> {
    Ok(Json(state.recurso_service.get(id).await?))
}

/// # Endpoint
///
/// `POST /api/recursos`
pub async fn create_recurso_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateRecursoRequest>,
) -> Result<(StatusCode, Json<Recurso>), AppError> {
    payload.validate()?;

    let recurso = state
        .recurso_service
        .create(payload.into_valores(today()), Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(recurso)))
}

/// # Endpoint
///
/// `PUT /api/recursos/{id}`
pub async fn update_recurso_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateRecursoRequest>,
) -> Result<Json<Recurso>, AppError> {
    payload.validate()?;
    Ok(Json(state.recurso_service.update(id, payload.into()).await?))
}

/// Dar de baja: sets `fecha_baja` to today.
///
/// # Endpoint
///
/// `DELETE /api/recursos/{id}`
pub async fn delete_recurso_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.recurso_service.dar_de_baja(id, today()).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// # Endpoint
///
/// `GET /api/recursos/{id}/entidades`
pub async fn recurso_entidades_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Vinculo>>, AppError> {
    Ok(Json(state.recurso_service.entidades(id).await?))
}

/// Most critical estado across the recurso's assignments, `null` when it
/// has none.
///
/// # Endpoint
///
/// `GET /api/recursos/{id}/estado-critico`
pub async fn recurso_estado_critico_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Option<Estado>>, AppError> {
    let estado = state
        .asignacion_service
        .estado_critico(TipoAsignacion::Recurso, id, today())
        .await?;

    Ok(Json(estado))
}
