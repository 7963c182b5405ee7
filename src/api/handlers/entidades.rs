//! Handlers for entidades and their recurso links.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::entidad::{
    CreateEntidadRequest, CreateVinculoRequest, UpdateEntidadRequest, UpdateVinculoRequest,
};
use crate::api::dto::pagination::{Paginated, PaginationParams};
use crate::domain::entities::{CurrentUser, Entidad, Estado, TipoAsignacion, Vinculo};
use crate::domain::vencimiento::today;
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `GET /api/entidades`
pub async fn entidad_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Entidad>>, AppError> {
    let query = params.to_list_query()?;

    let (items, total) = tokio::try_join!(
        state.entidad_service.list(query.clone()),
        state.entidad_service.count(query.search)
    )?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// # Endpoint
///
/// `GET /api/entidades/{id}`
pub async fn get_entidad_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Entidad>, AppError> {
    Ok(Json(state.entidad_service.get(id).await?))
}

/// # Endpoint
///
/// `POST /api/entidades`
///
/// # Errors
///
/// Returns 409 if the razon_social or cuit is taken.
pub async fn create_entidad_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<CreateEntidadRequest>,
) -> Result<(StatusCode, Json<Entidad>), AppError> {
    payload.validate()?;

    let entidad = state
        .entidad_service
        .create(payload.into(), Some(user.id))
        .await?;

    Ok((StatusCode::CREATED, Json(entidad)))
}

/// # Endpoint
///
/// `PUT /api/entidades/{id}`
pub async fn update_entidad_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateEntidadRequest>,
) -> Result<Json<Entidad>, AppError> {
    payload.validate()?;
    Ok(Json(state.entidad_service.update(id, payload.into()).await?))
}

/// Soft delete: sets `deleted_at`.
///
/// # Endpoint
///
/// `DELETE /api/entidades/{id}`
pub async fn delete_entidad_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.entidad_service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Most critical estado across the entidad's own assignments and those of
/// its active recursos.
///
/// # Endpoint
///
/// `GET /api/entidades/{id}/estado-critico`
pub async fn entidad_estado_critico_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Option<Estado>>, AppError> {
    let estado = state
        .asignacion_service
        .estado_critico(TipoAsignacion::Entidad, id, today())
        .await?;

    Ok(Json(estado))
}

/// # Endpoint
///
/// `GET /api/entidades/{id}/recursos`
pub async fn entidad_recursos_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Vec<Vinculo>>, AppError> {
    Ok(Json(state.entidad_service.recursos(id).await?))
}

/// Links a recurso to the entidad. `fecha_inicio` defaults to today.
///
/// # Endpoint
///
/// `POST /api/entidades/{id}/recursos`
pub async fn create_vinculo_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<CreateVinculoRequest>,
) -> Result<(StatusCode, Json<Vinculo>), AppError> {
    let valores = payload.valores(today());
    let vinculo = state
        .entidad_service
        .vincular(id, payload.recurso_id, valores)
        .await?;

    Ok((StatusCode::CREATED, Json(vinculo)))
}

/// # Endpoint
///
/// `PUT /api/entidades/recursos/{vinculo_id}`
pub async fn update_vinculo_handler(
    Path(vinculo_id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateVinculoRequest>,
) -> Result<Json<Vinculo>, AppError> {
    let vinculo = state
        .entidad_service
        .update_vinculo(vinculo_id, payload.into())
        .await?;

    Ok(Json(vinculo))
}

/// # Endpoint
///
/// `DELETE /api/entidades/recursos/{vinculo_id}`
pub async fn delete_vinculo_handler(
    Path(vinculo_id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.entidad_service.delete_vinculo(vinculo_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{MockRepos, bearer, d, entidad, estado, recurso, usuario, vinculo};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_create_rejects_invalid_url_and_cuit() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos.entidades.expect_create().never();

        let response = repos
            .server()
            .post("/api/entidades")
            .add_header(name, value)
            .json(&json!({
                "razon_social": "Acme S.A.",
                "cuit": "30-71234567-0",
                "url_plataforma": "not a url"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let fields = &response.json::<Value>()["error"]["details"]["fields"];
        assert!(fields.get("cuit").is_some());
        assert!(fields.get("url_plataforma").is_some());
    }

    #[tokio::test]
    async fn test_delete_is_soft() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos
            .entidades
            .expect_soft_delete()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(true));

        repos
            .server()
            .delete("/api/entidades/5")
            .add_header(name, value)
            .await
            .assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_vincular_rejects_fin_before_inicio() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos
            .entidades
            .expect_find_by_id()
            .returning(|id| Ok(Some(entidad(id))));
        repos
            .recursos
            .expect_find_by_id()
            .returning(|id| Ok(Some(recurso(id))));
        repos.vinculos.expect_create().never();

        let response = repos
            .server()
            .post("/api/entidades/2/recursos")
            .add_header(name, value)
            .json(&json!({
                "recurso_id": 3,
                "fecha_inicio": "2025-05-01",
                "fecha_fin": "2025-04-30"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_vincular_creates_link() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos
            .entidades
            .expect_find_by_id()
            .returning(|id| Ok(Some(entidad(id))));
        repos
            .recursos
            .expect_find_by_id()
            .returning(|id| Ok(Some(recurso(id))));
        repos
            .vinculos
            .expect_create()
            .withf(|e, r, v| *e == 2 && *r == 3 && v.fecha_inicio == d(2025, 5, 1))
            .returning(|e, r, v| {
                let mut link = vinculo(11, e, r);
                link.fecha_inicio = v.fecha_inicio;
                Ok(link)
            });

        let response = repos
            .server()
            .post("/api/entidades/2/recursos")
            .add_header(name, value)
            .json(&json!({ "recurso_id": 3, "fecha_inicio": "2025-05-01" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["id"], 11);
        assert_eq!(body["fecha_inicio"], "2025-05-01");
    }

    #[tokio::test]
    async fn test_update_vinculo_clears_fecha_fin() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos.vinculos.expect_find_by_id().returning(|id| {
            let mut link = vinculo(id, 2, 3);
            link.fecha_fin = Some(d(2025, 1, 1));
            Ok(Some(link))
        });
        repos
            .vinculos
            .expect_update()
            .withf(|_, v| v.fecha_fin.is_none())
            .returning(|id, _| Ok(vinculo(id, 2, 3)));

        let response = repos
            .server()
            .put("/api/entidades/recursos/11")
            .add_header(name, value)
            .json(&json!({ "fecha_fin": null }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["fecha_fin"], Value::Null);
    }

    #[tokio::test]
    async fn test_estado_critico_includes_recursos() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos
            .entidades
            .expect_find_by_id()
            .returning(|id| Ok(Some(entidad(id))));
        repos
            .estados
            .expect_list_for_entidad()
            .withf(|id, _| *id == 2)
            .returning(|_, _| Ok(vec![estado(5, "Por vencer", 5), estado(1, "Vigente", 1)]));

        let response = repos
            .server()
            .get("/api/entidades/2/estado-critico")
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["nivel"], 5);
    }
}
