//! API route configuration.
//!
//! Everything except login and registration requires Bearer token
//! authentication via [`crate::api::middleware::auth`]. User management and
//! the manual recomputation trigger additionally require the admin role.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post, put},
};

use crate::api::handlers::{
    archivo_list_handler, change_password_handler, create_documentacion_handler,
    create_entidad_documentacion_handler, create_entidad_handler, create_estado_handler,
    create_recurso_documentacion_handler, create_recurso_handler, create_usuario_handler,
    create_vinculo_handler, delete_archivo_handler, delete_documentacion_handler,
    delete_entidad_documentacion_handler, delete_entidad_handler, delete_estado_handler,
    delete_recurso_documentacion_handler, delete_recurso_handler, delete_usuario_handler,
    delete_vinculo_handler, documentacion_list_handler, download_archivo_handler,
    entidad_documentacion_handler, entidad_estado_critico_handler, entidad_list_handler,
    entidad_recursos_handler, estado_list_handler, estados_handler, get_archivo_handler,
    get_documentacion_handler, get_entidad_handler, get_estado_handler, get_recurso_handler,
    get_usuario_handler, login_handler, me_handler, recalcular_handler,
    recurso_documentacion_handler, recurso_entidades_handler, recurso_estado_critico_handler,
    recurso_list_handler, register_handler, reporte_entidad_handler,
    reporte_vencimientos_handler, resumen_handler, update_documentacion_handler,
    update_entidad_documentacion_handler, update_entidad_handler, update_estado_handler,
    update_recurso_documentacion_handler, update_recurso_handler, update_usuario_handler,
    update_vinculo_handler, upload_archivo_handler, usuario_list_handler, vencimientos_handler,
};
use crate::api::middleware::auth;
use crate::state::AppState;

/// Room for multipart boundaries and the text fields around the file.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Routes reachable without a token.
///
/// - `POST /auth/login`
/// - `POST /auth/register` (403 unless `ALLOW_REGISTRATION`)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login_handler))
        .route("/auth/register", post(register_handler))
}

/// Routes for any authenticated user.
///
/// `max_upload_bytes` sizes the body limit of the upload route.
pub fn protected_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me_handler))
        .route("/auth/password", put(change_password_handler))
        .route(
            "/estados",
            get(estado_list_handler).post(create_estado_handler),
        )
        .route(
            "/estados/{id}",
            get(get_estado_handler)
                .put(update_estado_handler)
                .delete(delete_estado_handler),
        )
        .route(
            "/documentacion",
            get(documentacion_list_handler).post(create_documentacion_handler),
        )
        .route(
            "/documentacion/{id}",
            get(get_documentacion_handler)
                .put(update_documentacion_handler)
                .delete(delete_documentacion_handler),
        )
        .route(
            "/recursos",
            get(recurso_list_handler).post(create_recurso_handler),
        )
        .route(
            "/recursos/{id}",
            get(get_recurso_handler)
                .put(update_recurso_handler)
                .delete(delete_recurso_handler),
        )
        .route(
            "/recursos/{id}/documentacion",
            get(recurso_documentacion_handler).post(create_recurso_documentacion_handler),
        )
        .route(
            "/recursos/documentacion/{id}",
            put(update_recurso_documentacion_handler).delete(delete_recurso_documentacion_handler),
        )
        .route(
            "/recursos/{id}/estado-critico",
            get(recurso_estado_critico_handler),
        )
        .route("/recursos/{id}/entidades", get(recurso_entidades_handler))
        .route(
            "/entidades",
            get(entidad_list_handler).post(create_entidad_handler),
        )
        .route(
            "/entidades/{id}",
            get(get_entidad_handler)
                .put(update_entidad_handler)
                .delete(delete_entidad_handler),
        )
        .route(
            "/entidades/{id}/documentacion",
            get(entidad_documentacion_handler).post(create_entidad_documentacion_handler),
        )
        .route(
            "/entidades/documentacion/{id}",
            put(update_entidad_documentacion_handler).delete(delete_entidad_documentacion_handler),
        )
        .route(
            "/entidades/{id}/estado-critico",
            get(entidad_estado_critico_handler),
        )
        .route(
            "/entidades/{id}/recursos",
            get(entidad_recursos_handler).post(create_vinculo_handler),
        )
        .route(
            "/entidades/recursos/{id}",
            put(update_vinculo_handler).delete(delete_vinculo_handler),
        )
        .route("/dashboard/resumen", get(resumen_handler))
        .route("/dashboard/estados", get(estados_handler))
        .route("/dashboard/vencimientos", get(vencimientos_handler))
        .route("/reportes/vencimientos", get(reporte_vencimientos_handler))
        .route("/reportes/entidades/{id}", get(reporte_entidad_handler))
        .route(
            "/archivos",
            post(upload_archivo_handler)
                .layer(DefaultBodyLimit::max(
                    max_upload_bytes.saturating_add(MULTIPART_OVERHEAD),
                ))
                .get(archivo_list_handler),
        )
        .route(
            "/archivos/{id}",
            get(get_archivo_handler).delete(delete_archivo_handler),
        )
        .route("/archivos/{id}/descarga", get(download_archivo_handler))
        .merge(admin_routes().route_layer(middleware::from_fn(auth::require_admin)))
}

/// Routes restricted to administrators.
///
/// - `/usuarios` CRUD
/// - `POST /vencimientos/recalcular`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/usuarios",
            get(usuario_list_handler).post(create_usuario_handler),
        )
        .route(
            "/usuarios/{id}",
            get(get_usuario_handler)
                .put(update_usuario_handler)
                .delete(delete_usuario_handler),
        )
        .route("/vencimientos/recalcular", post(recalcular_handler))
}

/// Protected routes wrapped in the Bearer authentication layer.
pub fn authenticated_routes(state: &AppState) -> Router<AppState> {
    protected_routes(state.archivo_service.max_bytes())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
}

/// The whole `/api` tree without rate limiting.
pub fn api_router(state: &AppState) -> Router<AppState> {
    public_routes().merge(authenticated_routes(state))
}
