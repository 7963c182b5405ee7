//! Fixtures shared by in-crate unit and handler tests.

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, header::AUTHORIZATION};
use axum::{Router, routing::get};
use axum_test::TestServer;
use chrono::{NaiveDate, Utc};

use crate::api::handlers::health_handler;
use crate::api::routes::api_router;
use crate::application::services::AuthService;
use crate::config::EstadoNames;
use crate::domain::entities::{
    Asignacion, CurrentUser, Documentacion, Entidad, Estado, Recurso, Rol, Usuario, Vinculo,
};
use crate::domain::repositories::{
    MockArchivoRepository, MockAsignacionRepository, MockDocumentacionRepository,
    MockEntidadRepository, MockEstadoRepository, MockRecursoRepository, MockUsuarioRepository,
    MockVencimientoRepository, MockVinculoRepository,
};
use crate::infrastructure::storage::MockFileStorage;
use crate::state::{AppState, Repositories, ServiceSettings};

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-with-at-least-32-bytes";
pub const TEST_MAX_UPLOAD_BYTES: usize = 1024;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

pub fn estado(id: i64, nombre: &str, nivel: i32) -> Estado {
    Estado {
        id,
        nombre: nombre.to_string(),
        descripcion: None,
        color: "#6c757d".to_string(),
        nivel,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// The three seeded estados: Vigente (1), Por vencer (5), Vencido (8).
pub fn seeded() -> Vec<Estado> {
    vec![
        estado(1, "Vigente", 1),
        estado(5, "Por vencer", 5),
        estado(8, "Vencido", 8),
    ]
}

/// An estado repository mock that knows the seeded estados by id and name.
pub fn estados_seeded() -> MockEstadoRepository {
    let mut mock = MockEstadoRepository::new();
    mock.expect_find_by_id()
        .returning(|id| Ok(seeded().into_iter().find(|e| e.id == id)));
    mock.expect_find_by_nombre()
        .returning(|nombre| Ok(seeded().into_iter().find(|e| e.nombre == nombre)));
    mock
}

pub fn usuario(id: i64) -> Usuario {
    Usuario {
        id,
        username: format!("user{id}"),
        email: format!("user{id}@example.com"),
        password_hash: String::new(),
        nombre: "Ana".to_string(),
        apellido: "Gómez".to_string(),
        rol: Rol::Usuario,
        activo: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn admin(id: i64) -> CurrentUser {
    CurrentUser {
        id,
        username: format!("admin{id}"),
        rol: Rol::Admin,
    }
}

pub fn documentacion(id: i64, codigo: &str) -> Documentacion {
    Documentacion {
        id,
        codigo: codigo.to_string(),
        descripcion: format!("Documento {codigo}"),
        dias_vigencia: 365,
        dias_anticipacion: 30,
        es_obligatorio: true,
        es_universal: false,
        estado_vencimiento_id: None,
        estado_id: None,
        fecha_emision: None,
        fecha_tramitacion: None,
        fecha_vencimiento: None,
        observaciones: None,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn recurso(id: i64) -> Recurso {
    Recurso {
        id,
        codigo: format!("R{id:03}"),
        apellido: "Pérez".to_string(),
        nombre: "Juan".to_string(),
        telefono: None,
        cuil: None,
        direccion: None,
        localidad: None,
        observaciones: None,
        fecha_alta: d(2024, 1, 1),
        fecha_baja: None,
        estado_id: None,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn entidad(id: i64) -> Entidad {
    Entidad {
        id,
        razon_social: format!("Entidad {id} S.A."),
        cuit: None,
        domicilio: None,
        telefono: None,
        localidad: None,
        email: None,
        url_plataforma: None,
        observaciones: None,
        created_by: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
        deleted_at: None,
    }
}

pub fn asignacion(id: i64, titular_id: i64, fecha_vencimiento: Option<NaiveDate>) -> Asignacion {
    Asignacion {
        id,
        titular_id,
        documentacion_id: 1,
        documentacion_codigo: "ART".to_string(),
        documentacion_descripcion: "Seguro ART".to_string(),
        dias_anticipacion: 30,
        fecha_emision: None,
        fecha_tramitacion: None,
        fecha_vencimiento,
        estado_id: None,
        estado_nombre: None,
        estado_color: None,
        estado_nivel: None,
        observaciones: None,
        es_inhabilitante: false,
        notificar_email: false,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn vinculo(id: i64, entidad_id: i64, recurso_id: i64) -> Vinculo {
    Vinculo {
        id,
        entidad_id,
        razon_social: format!("Entidad {entidad_id} S.A."),
        recurso_id,
        recurso_codigo: format!("R{recurso_id:03}"),
        recurso_apellido: "Pérez".to_string(),
        recurso_nombre: "Juan".to_string(),
        recurso_fecha_baja: None,
        fecha_inicio: d(2024, 1, 1),
        fecha_fin: None,
        observaciones: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn admin_usuario(id: i64) -> Usuario {
    Usuario {
        rol: Rol::Admin,
        username: format!("admin{id}"),
        ..usuario(id)
    }
}

pub fn settings() -> ServiceSettings {
    ServiceSettings {
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_expiration_hours: 1,
        allow_registration: true,
        max_upload_bytes: TEST_MAX_UPLOAD_BYTES,
        estados: EstadoNames::default(),
    }
}

/// Mocks for every repository plus the file storage, turned into an
/// [`AppState`] for handler tests.
#[derive(Default)]
pub struct MockRepos {
    pub usuarios: MockUsuarioRepository,
    pub estados: MockEstadoRepository,
    pub documentaciones: MockDocumentacionRepository,
    pub recursos: MockRecursoRepository,
    pub entidades: MockEntidadRepository,
    pub asignaciones: MockAsignacionRepository,
    pub vinculos: MockVinculoRepository,
    pub vencimientos: MockVencimientoRepository,
    pub archivos: MockArchivoRepository,
    pub storage: MockFileStorage,
}

impl MockRepos {
    /// Makes `u` resolvable by the bearer middleware.
    pub fn with_user(mut self, u: Usuario) -> Self {
        let uid = u.id;
        self.usuarios
            .expect_find_by_id()
            .withf(move |id| *id == uid)
            .returning(move |_| Ok(Some(u.clone())));
        self
    }

    pub fn into_state(self) -> AppState {
        let repos = Repositories {
            usuarios: Arc::new(self.usuarios),
            estados: Arc::new(self.estados),
            documentaciones: Arc::new(self.documentaciones),
            recursos: Arc::new(self.recursos),
            entidades: Arc::new(self.entidades),
            asignaciones: Arc::new(self.asignaciones),
            vinculos: Arc::new(self.vinculos),
            vencimientos: Arc::new(self.vencimientos),
            archivos: Arc::new(self.archivos),
        };

        AppState::new(repos, Arc::new(self.storage), &settings())
    }

    pub fn server(self) -> TestServer {
        server(self.into_state())
    }
}

/// `/health` plus the `/api` tree with authentication, without rate limiting.
pub fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router(&state))
        .with_state(state);

    TestServer::new(app).unwrap()
}

/// `Authorization` header carrying a valid token for `u`.
pub fn bearer(u: &Usuario) -> (HeaderName, HeaderValue) {
    let auth = AuthService::new(
        Arc::new(MockUsuarioRepository::new()),
        TEST_JWT_SECRET,
        1,
        false,
    );
    let token = auth.issue_token(u).unwrap();
    (
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    )
}
