//! Bearer token authentication and role guard middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{domain::entities::CurrentUser, error::AppError, state::AppState};

/// Authenticates requests using a JWT from the Authorization header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// # Authentication Flow
///
/// 1. Extract token from `Authorization` header
/// 2. Verify signature and expiration
/// 3. Reload the user and reject inactive accounts
/// 4. Store [`CurrentUser`] in request extensions
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if the
/// header is missing, the token is invalid or expired, or the user no
/// longer exists or is inactive.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let user = st.auth_service.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}

/// Rejects non-admin users with `403 Forbidden`.
///
/// Must run after [`layer`].
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req.extensions().get::<CurrentUser>().ok_or_else(|| {
        AppError::unauthorized("Unauthorized", serde_json::json!({}))
    })?;

    user.require_admin()?;

    Ok(next.run(req).await)
}
