//! Handlers for user administration (admin only).

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::{Paginated, PaginationParams};
use crate::api::dto::usuario::{CreateUsuarioRequest, UpdateUsuarioRequest};
use crate::application::services::usuario_service::{CambiosUsuario, NuevoUsuario};
use crate::domain::entities::{CurrentUser, Rol, Usuario};
use crate::error::AppError;
use crate::state::AppState;

/// Lists users, searching username, e-mail, nombre and apellido.
///
/// # Endpoint
///
/// `GET /api/usuarios`
pub async fn usuario_list_handler(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<Paginated<Usuario>>, AppError> {
    let query = params.to_list_query()?;

    let (items, total) = tokio::try_join!(
        state.usuario_service.list(query.clone()),
        state.usuario_service.count(query.search)
    )?;

    Ok(Json(Paginated::new(items, &params, total)))
}

/// # Endpoint
///
/// `GET /api/usuarios/{id}`
pub async fn get_usuario_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Usuario>, AppError> {
    Ok(Json(state.usuario_service.get(id).await?))
}

/// # Endpoint
///
/// `POST /api/usuarios`
///
/// # Errors
///
/// Returns 409 if the username or e-mail is taken.
pub async fn create_usuario_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUsuarioRequest>,
) -> Result<(StatusCode, Json<Usuario>), AppError> {
    payload.validate()?;

    let usuario = state
        .usuario_service
        .create(NuevoUsuario {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            nombre: payload.nombre,
            apellido: payload.apellido,
            rol: payload.rol.unwrap_or(Rol::Usuario),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(usuario)))
}

/// # Endpoint
///
/// `PUT /api/usuarios/{id}`
///
/// All fields are optional. `password` resets the password.
///
/// # Errors
///
/// Returns 400 when an admin deactivates their own account.
pub async fn update_usuario_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(actor): Extension<CurrentUser>,
    Json(payload): Json<UpdateUsuarioRequest>,
) -> Result<Json<Usuario>, AppError> {
    payload.validate()?;

    let cambios = CambiosUsuario {
        email: payload.email,
        nombre: payload.nombre,
        apellido: payload.apellido,
        rol: payload.rol,
        activo: payload.activo,
        password: payload.password,
    };

    Ok(Json(state.usuario_service.update(id, cambios, &actor).await?))
}

/// Deactivates a user (`activo = false`).
///
/// # Endpoint
///
/// `DELETE /api/usuarios/{id}`
pub async fn delete_usuario_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Extension(actor): Extension<CurrentUser>,
) -> Result<StatusCode, AppError> {
    state.usuario_service.deactivate(id, &actor).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{MockRepos, admin_usuario, bearer, usuario};
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_non_admin_is_forbidden() {
        let u = usuario(2);
        let (name, value) = bearer(&u);

        let response = MockRepos::default()
            .with_user(u)
            .server()
            .get("/api/usuarios")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_list_is_paginated() {
        let admin = admin_usuario(1);
        let (name, value) = bearer(&admin);

        let mut repos = MockRepos::default().with_user(admin);
        repos
            .usuarios
            .expect_list()
            .withf(|q| q.offset == 2 && q.limit == 2)
            .returning(|_| Ok(vec![usuario(3), usuario(4)]));
        repos.usuarios.expect_count().returning(|_| Ok(5));

        let response = repos
            .server()
            .get("/api/usuarios")
            .add_query_param("page", 2)
            .add_query_param("page_size", 2)
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["pagination"]["total_items"], 5);
        assert_eq!(body["pagination"]["total_pages"], 3);
        assert_eq!(body["items"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_admin_cannot_deactivate_self() {
        let admin = admin_usuario(1);
        let (name, value) = bearer(&admin);

        let response = MockRepos::default()
            .with_user(admin)
            .server()
            .delete("/api/usuarios/1")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_requires_long_password() {
        let admin = admin_usuario(1);
        let (name, value) = bearer(&admin);

        let response = MockRepos::default()
            .with_user(admin)
            .server()
            .post("/api/usuarios")
            .add_header(name, value)
            .json(&json!({
                "username": "nuevo",
                "email": "nuevo@example.com",
                "password": "1234",
                "nombre": "N",
                "apellido": "U"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
