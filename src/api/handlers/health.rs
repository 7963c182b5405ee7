//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "ok", "message": "Connected, 3 estados" },
///     "storage": { "status": "ok", "message": "Upload directory writable" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let (database, storage) = tokio::join!(check_database(&state), check_storage(&state));

    let all_healthy = database.is_ok() && storage.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { database, storage },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_database(state: &AppState) -> CheckStatus {
    match state.estado_service.count(None).await {
        Ok(total) => CheckStatus::ok(format!("Connected, {total} estados")),
        Err(e) => CheckStatus::error(format!("Database error: {e}")),
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    if state.storage.health_check().await {
        CheckStatus::ok("Upload directory writable")
    } else {
        CheckStatus::error("Upload directory not writable")
    }
}

#[cfg(test)]
mod tests {
    use crate::error::AppError;
    use crate::test_support::MockRepos;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    #[tokio::test]
    async fn test_healthy() {
        let mut repos = MockRepos::default();
        repos.estados.expect_count().returning(|_| Ok(3));
        repos.storage.expect_health_check().returning(|| true);

        let response = repos.server().get("/health").await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"]["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn test_database_down_is_degraded() {
        let mut repos = MockRepos::default();
        repos
            .estados
            .expect_count()
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        repos.storage.expect_health_check().returning(|| true);

        let response = repos.server().get("/health").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body = response.json::<Value>();
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["checks"]["database"]["status"], "error");
        assert_eq!(body["checks"]["storage"]["status"], "ok");
    }
}
