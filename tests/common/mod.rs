#![allow(dead_code)]

use axioma_docs::api::routes::api_router;
use axioma_docs::config::EstadoNames;
use axioma_docs::domain::entities::{NewUsuario, Rol};
use axioma_docs::domain::repositories::UsuarioRepository;
use axioma_docs::infrastructure::persistence::PgUsuarioRepository;
use axioma_docs::infrastructure::storage::LocalFileStorage;
use axioma_docs::state::{AppState, Repositories, ServiceSettings};
use axum::Router;
use chrono::NaiveDate;
use sqlx::PgPool;
use std::path::Path;
use std::sync::Arc;

pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub async fn estado_id(pool: &PgPool, nombre: &str) -> i64 {
    sqlx::query_scalar("SELECT id FROM estados WHERE nombre = $1")
        .bind(nombre)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_test_documentacion(
    pool: &PgPool,
    codigo: &str,
    dias_vigencia: i32,
    dias_anticipacion: i32,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO documentacion (codigo, descripcion, dias_vigencia, dias_anticipacion) \
         VALUES ($1, $1, $2, $3) RETURNING id",
    )
    .bind(codigo)
    .bind(dias_vigencia)
    .bind(dias_anticipacion)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_universal_documentacion(
    pool: &PgPool,
    codigo: &str,
    fecha_vencimiento: NaiveDate,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO documentacion (codigo, descripcion, dias_vigencia, dias_anticipacion, \
         es_universal, fecha_vencimiento) VALUES ($1, $1, 365, 10, TRUE, $2) RETURNING id",
    )
    .bind(codigo)
    .bind(fecha_vencimiento)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_recurso(pool: &PgPool, codigo: &str, apellido: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO recursos (codigo, apellido, nombre) VALUES ($1, $2, 'Test') RETURNING id",
    )
    .bind(codigo)
    .bind(apellido)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_recurso_de_baja(pool: &PgPool, codigo: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO recursos (codigo, apellido, nombre, fecha_baja) \
         VALUES ($1, 'Baja', 'Test', CURRENT_DATE) RETURNING id",
    )
    .bind(codigo)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn create_test_entidad(pool: &PgPool, razon_social: &str) -> i64 {
    sqlx::query_scalar("INSERT INTO entidades (razon_social) VALUES ($1) RETURNING id")
        .bind(razon_social)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn create_deleted_entidad(pool: &PgPool, razon_social: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO entidades (razon_social, deleted_at) VALUES ($1, NOW()) RETURNING id",
    )
    .bind(razon_social)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn assign_to_recurso(
    pool: &PgPool,
    recurso_id: i64,
    documentacion_id: i64,
    fecha_vencimiento: Option<NaiveDate>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO recurso_documentacion (recurso_id, documentacion_id, fecha_vencimiento) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(recurso_id)
    .bind(documentacion_id)
    .bind(fecha_vencimiento)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn assign_to_entidad(
    pool: &PgPool,
    entidad_id: i64,
    documentacion_id: i64,
    fecha_vencimiento: Option<NaiveDate>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO entidad_documentacion (entidad_id, documentacion_id, fecha_vencimiento) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(entidad_id)
    .bind(documentacion_id)
    .bind(fecha_vencimiento)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn link(
    pool: &PgPool,
    entidad_id: i64,
    recurso_id: i64,
    fecha_inicio: NaiveDate,
    fecha_fin: Option<NaiveDate>,
) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO entidad_recurso (entidad_id, recurso_id, fecha_inicio, fecha_fin) \
         VALUES ($1, $2, $3, $4) RETURNING id",
    )
    .bind(entidad_id)
    .bind(recurso_id)
    .bind(fecha_inicio)
    .bind(fecha_fin)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn estado_of(pool: &PgPool, tabla: &str, id: i64) -> Option<i64> {
    sqlx::query_scalar(&format!("SELECT estado_id FROM {tabla} WHERE id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_settings() -> ServiceSettings {
    ServiceSettings {
        jwt_secret: "test-signing-secret-with-enough-length".to_string(),
        jwt_expiration_hours: 1,
        allow_registration: true,
        max_upload_bytes: MAX_UPLOAD_BYTES,
        estados: EstadoNames::default(),
    }
}

pub async fn create_test_state(pool: PgPool, upload_dir: &Path) -> AppState {
    let storage = LocalFileStorage::init(upload_dir).await.unwrap();
    AppState::new(
        Repositories::postgres(Arc::new(pool)),
        Arc::new(storage),
        &create_test_settings(),
    )
}

pub fn create_test_app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_router(&state))
        .with_state(state)
}

/// Inserts a user directly and returns a bearer token for it.
pub async fn create_user_token(state: &AppState, pool: &PgPool, username: &str, rol: Rol) -> String {
    let repo = PgUsuarioRepository::new(Arc::new(pool.clone()));
    let usuario = repo
        .create(NewUsuario {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "not-a-real-hash".to_string(),
            nombre: "Test".to_string(),
            apellido: "User".to_string(),
            rol,
        })
        .await
        .unwrap();

    state.auth_service.issue_token(&usuario).unwrap()
}
