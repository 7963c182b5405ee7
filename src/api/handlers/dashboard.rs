//! Dashboard and report handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::json;

use crate::api::dto::dashboard::{MAX_DIAS, ReporteVencimientosParams, VencimientosParams};
use crate::application::services::dashboard_service::{Resumen, VencimientoDetalle};
use crate::application::services::reporte_service::EntidadReporte;
use crate::domain::entities::EstadoConteo;
use crate::domain::vencimiento::today;
use crate::error::AppError;
use crate::state::AppState;

const DEFAULT_DIAS: u32 = 30;

/// # Endpoint
///
/// `GET /api/dashboard/resumen`
pub async fn resumen_handler(State(state): State<AppState>) -> Result<Json<Resumen>, AppError> {
    Ok(Json(state.dashboard_service.resumen(today()).await?))
}

/// Assignments grouped by estado, highest nivel first.
///
/// # Endpoint
///
/// `GET /api/dashboard/estados`
pub async fn estados_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<EstadoConteo>>, AppError> {
    Ok(Json(state.dashboard_service.estados().await?))
}

/// Documents expiring within the next `dias` days, soonest first.
///
/// # Endpoint
///
/// `GET /api/dashboard/vencimientos?dias=30&incluir_vencidos=true`
///
/// # Errors
///
/// Returns 400 when `dias` exceeds [`MAX_DIAS`].
pub async fn vencimientos_handler(
    State(state): State<AppState>,
    Query(params): Query<VencimientosParams>,
) -> Result<Json<Vec<VencimientoDetalle>>, AppError> {
    let dias = params.dias.unwrap_or(DEFAULT_DIAS);
    if dias > MAX_DIAS {
        return Err(AppError::bad_request(
            format!("dias must be at most {MAX_DIAS}"),
            json!({ "dias": dias }),
        ));
    }

    let items = state
        .dashboard_service
        .vencimientos(dias, params.incluir_vencidos.unwrap_or(true), today())
        .await?;

    Ok(Json(items))
}

/// Documents expiring inside `[desde, hasta]`, optionally restricted to an
/// entidad and its active recursos.
///
/// # Endpoint
///
/// `GET /api/reportes/vencimientos?desde=2025-01-01&hasta=2025-12-31&entidad_id=3`
pub async fn reporte_vencimientos_handler(
    State(state): State<AppState>,
    Query(params): Query<ReporteVencimientosParams>,
) -> Result<Json<Vec<VencimientoDetalle>>, AppError> {
    let items = state
        .reporte_service
        .vencimientos(params.into(), today())
        .await?;

    Ok(Json(items))
}

/// # Endpoint
///
/// `GET /api/reportes/entidades/{id}`
pub async fn reporte_entidad_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<EntidadReporte>, AppError> {
    Ok(Json(state.reporte_service.entidad(id, today()).await?))
}

#[cfg(test)]
mod tests {
    use crate::domain::entities::{EstadoConteo, TipoAsignacion, Totales, VencimientoItem};
    use crate::domain::vencimiento::today;
    use crate::test_support::{MockRepos, bearer, d, entidad, recurso, usuario, vinculo};
    use axum::http::StatusCode;
    use chrono::{Days, NaiveDate};
    use serde_json::Value;

    fn item(id: i64, fecha_vencimiento: NaiveDate) -> VencimientoItem {
        VencimientoItem {
            tipo: TipoAsignacion::Recurso,
            asignacion_id: id,
            titular_id: Some(3),
            titular: "Pérez, Juan".to_string(),
            documentacion_id: 1,
            documentacion_codigo: "ART".to_string(),
            fecha_vencimiento,
            dias_anticipacion: 30,
            estado_id: None,
            estado_nombre: None,
            estado_color: None,
        }
    }

    #[tokio::test]
    async fn test_resumen_counts_totals() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos.vencimientos.expect_totales().returning(|| {
            Ok(Totales {
                recursos_activos: 12,
                entidades: 4,
                documentaciones: 7,
            })
        });
        repos
            .vencimientos
            .expect_list_vencibles()
            .returning(|| Ok(vec![]));

        let response = repos
            .server()
            .get("/api/dashboard/resumen")
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["recursos_activos"], 12);
        assert_eq!(body["documentos"]["vencidos"], 0);
    }

    #[tokio::test]
    async fn test_estados_distribution() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos.vencimientos.expect_estado_distribution().returning(|| {
            Ok(vec![EstadoConteo {
                estado_id: Some(8),
                nombre: Some("Vencido".to_string()),
                color: Some("#dc3545".to_string()),
                nivel: Some(8),
                cantidad: 3,
            }])
        });

        let response = repos
            .server()
            .get("/api/dashboard/estados")
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()[0]["cantidad"], 3);
    }

    #[tokio::test]
    async fn test_vencimientos_default_window() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let hoy = today();
        let mut repos = MockRepos::default().with_user(u);
        repos
            .vencimientos
            .expect_find_vencimientos()
            .withf(move |f, _| f.desde.is_none() && f.hasta == Some(hoy + Days::new(30)))
            .returning(move |_, _| Ok(vec![item(1, hoy + Days::new(5))]));

        let response = repos
            .server()
            .get("/api/dashboard/vencimientos")
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body[0]["dias_restantes"], 5);
        assert_eq!(body[0]["status"], "por_vencer");
        assert_eq!(body[0]["titular"], "Pérez, Juan");
    }

    #[tokio::test]
    async fn test_vencimientos_without_expired() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let hoy = today();
        let mut repos = MockRepos::default().with_user(u);
        repos
            .vencimientos
            .expect_find_vencimientos()
            .withf(move |f, _| f.desde == Some(hoy) && f.hasta == Some(hoy + Days::new(7)))
            .returning(|_, _| Ok(vec![]));

        repos
            .server()
            .get("/api/dashboard/vencimientos")
            .add_query_param("dias", 7)
            .add_query_param("incluir_vencidos", "false")
            .add_header(name, value)
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_vencimientos_window_too_large() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos.vencimientos.expect_find_vencimientos().never();

        repos
            .server()
            .get("/api/dashboard/vencimientos")
            .add_query_param("dias", 5000)
            .add_header(name, value)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reporte_rejects_inverted_range() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos.vencimientos.expect_find_vencimientos().never();

        repos
            .server()
            .get("/api/reportes/vencimientos")
            .add_query_param("desde", "2025-12-31")
            .add_query_param("hasta", "2025-01-01")
            .add_header(name, value)
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_reporte_by_entidad() {
        let u = usuario(1);
        let (name, value) = bearer(&u);

        let mut repos = MockRepos::default().with_user(u);
        repos
            .entidades
            .expect_find_by_id()
            .returning(|id| Ok(Some(entidad(id))));
        repos
            .vencimientos
            .expect_find_vencimientos()
            .withf(|f, _| f.entidad_id == Some(2) && f.desde == Some(d(2025, 1, 1)))
            .returning(|_, _| Ok(vec![item(4, d(2025, 3, 1))]));

        let response = repos
            .server()
            .get("/api/reportes/vencimientos")
            .add_query_param("desde", "2025-01-01")
            .add_query_param("entidad_id", 2)
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()[0]["asignacion_id"], 4);
    }

    #[tokio::test]
    async fn test_reporte_entidad_skips_inactive_recursos() {
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
        repos.vinculos.expect_list_by_entidad().returning(|id| {
            let activo = vinculo(1, id, 3);
            let mut terminado = vinculo(2, id, 4);
            terminado.fecha_fin = Some(d(2020, 1, 1));
            Ok(vec![activo, terminado])
        });
        repos
            .asignaciones
            .expect_list()
            .returning(|_, _| Ok(vec![]));
        repos
            .estados
            .expect_list_for_entidad()
            .returning(|_, _| Ok(vec![]));

        let response = repos
            .server()
            .get("/api/reportes/entidades/2")
            .add_header(name, value)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["recursos"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["recursos"][0]["vinculo"]["recurso_id"], 3);
        assert_eq!(body["estado_critico"], Value::Null);
    }
}
