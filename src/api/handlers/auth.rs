//! Handlers for authentication endpoints.

use axum::{Extension, Json, extract::State, http::StatusCode};
use validator::Validate;

use crate::api::dto::auth::{ChangePasswordRequest, LoginRequest, LoginResponse, RegisterRequest};
use crate::application::services::auth_service::Registro;
use crate::domain::entities::{CurrentUser, Usuario};
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// Returns 401 for unknown users, inactive users and wrong passwords alike.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let (token, usuario) = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse { token, usuario }))
}

/// Self-registration.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Errors
///
/// Returns 403 when registration is disabled, 409 for a taken username or
/// e-mail.
pub async fn register_handler(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Usuario>), AppError> {
    payload.validate()?;

    let usuario = state
        .auth_service
        .register(Registro {
            username: payload.username,
            email: payload.email,
            password: payload.password,
            nombre: payload.nombre,
            apellido: payload.apellido,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(usuario)))
}

/// # Endpoint
///
/// `GET /api/auth/me`
pub async fn me_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<Usuario>, AppError> {
    Ok(Json(state.auth_service.me(user.id).await?))
}

/// Changes the caller's password.
///
/// # Endpoint
///
/// `PUT /api/auth/password`
///
/// # Errors
///
/// Returns 400 if `password_actual` is wrong.
pub async fn change_password_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;

    state
        .auth_service
        .change_password(user.id, &payload.password_actual, &payload.password_nuevo)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::test_support::{MockRepos, bearer, usuario};
    use crate::utils::password::hash_password;
    use axum::http::{StatusCode, header::WWW_AUTHENTICATE};
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_login_returns_token() {
        let mut repos = MockRepos::default();
        repos.usuarios.expect_find_by_login().returning(|login| {
            let mut u = usuario(1);
            u.username = login.to_string();
            u.password_hash = hash_password("correcto-123").unwrap();
            Ok(Some(u))
        });

        let response = repos
            .server()
            .post("/api/auth/login")
            .json(&json!({ "username": "ana", "password": "correcto-123" }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["usuario"]["username"], "ana");
        assert!(body["usuario"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_wrong_password_is_401() {
        let mut repos = MockRepos::default();
        repos.usuarios.expect_find_by_login().returning(|_| {
            let mut u = usuario(1);
            u.password_hash = hash_password("correcto-123").unwrap();
            Ok(Some(u))
        });

        let response = repos
            .server()
            .post("/api/auth/login")
            .json(&json!({ "username": "ana", "password": "otro" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["error"]["code"], "unauthorized");
    }

    #[tokio::test]
    async fn test_me_requires_token() {
        let response = MockRepos::default().server().get("/api/auth/me").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.header(WWW_AUTHENTICATE), "Bearer");
    }

    #[tokio::test]
    async fn test_me_with_token() {
        let u = usuario(7);
        let (name, value) = bearer(&u);

        let response = MockRepos::default()
            .with_user(u)
            .server()
            .get("/api/auth/me")
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["id"], 7);
    }

    #[tokio::test]
    async fn test_inactive_user_token_is_rejected() {
        let mut u = usuario(7);
        u.activo = false;
        let (name, value) = bearer(&u);

        let response = MockRepos::default()
            .with_user(u)
            .server()
            .get("/api/auth/me")
            .add_header(name, value)
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_register_validates_fields() {
        let response = MockRepos::default()
            .server()
            .post("/api/auth/register")
            .json(&json!({
                "username": "a b",
                "email": "no-email",
                "password": "corta",
                "nombre": "Ana",
                "apellido": "Paz"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let fields = &response.json::<Value>()["error"]["details"]["fields"];
        assert!(fields.get("username").is_some());
        assert!(fields.get("email").is_some());
        assert!(fields.get("password").is_some());
    }
}
