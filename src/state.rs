//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    ArchivoService, AsignacionService, AuthService, DashboardService, DocumentacionService,
    EntidadService, EstadoService, RecursoService, ReporteService, UsuarioService,
    VencimientoService,
};
use crate::config::{Config, EstadoNames};
use crate::domain::repositories::{
    ArchivoRepository, AsignacionRepository, DocumentacionRepository, EntidadRepository,
    EstadoRepository, RecursoRepository, UsuarioRepository, VencimientoRepository,
    VinculoRepository,
};
use crate::infrastructure::persistence::{
    PgArchivoRepository, PgAsignacionRepository, PgDocumentacionRepository, PgEntidadRepository,
    PgEstadoRepository, PgRecursoRepository, PgUsuarioRepository, PgVencimientoRepository,
    PgVinculoRepository,
};
use crate::infrastructure::storage::FileStorage;

/// Every repository the services are built from.
#[derive(Clone)]
pub struct Repositories {
    pub usuarios: Arc<dyn UsuarioRepository>,
    pub estados: Arc<dyn EstadoRepository>,
    pub documentaciones: Arc<dyn DocumentacionRepository>,
    pub recursos: Arc<dyn RecursoRepository>,
    pub entidades: Arc<dyn EntidadRepository>,
    pub asignaciones: Arc<dyn AsignacionRepository>,
    pub vinculos: Arc<dyn VinculoRepository>,
    pub vencimientos: Arc<dyn VencimientoRepository>,
    pub archivos: Arc<dyn ArchivoRepository>,
}

impl Repositories {
    /// PostgreSQL-backed repositories sharing one pool.
    pub fn postgres(pool: Arc<PgPool>) -> Self {
        Self {
            usuarios: Arc::new(PgUsuarioRepository::new(pool.clone())),
            estados: Arc::new(PgEstadoRepository::new(pool.clone())),
            documentaciones: Arc::new(PgDocumentacionRepository::new(pool.clone())),
            recursos: Arc::new(PgRecursoRepository::new(pool.clone())),
            entidades: Arc::new(PgEntidadRepository::new(pool.clone())),
            asignaciones: Arc::new(PgAsignacionRepository::new(pool.clone())),
            vinculos: Arc::new(PgVinculoRepository::new(pool.clone())),
            vencimientos: Arc::new(PgVencimientoRepository::new(pool.clone())),
            archivos: Arc::new(PgArchivoRepository::new(pool)),
        }
    }
}

/// The part of [`Config`] the services need.
#[derive(Debug, Clone)]
pub struct ServiceSettings {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub allow_registration: bool,
    pub max_upload_bytes: usize,
    pub estados: EstadoNames,
}

impl From<&Config> for ServiceSettings {
    fn from(config: &Config) -> Self {
        Self {
            jwt_secret: config.jwt_secret.clone(),
            jwt_expiration_hours: config.jwt_expiration_hours,
            allow_registration: config.allow_registration,
            max_upload_bytes: config.max_upload_bytes,
            estados: config.estados.clone(),
        }
    }
}

/// Application state shared across all request handlers.
///
/// Cloned for each request; all fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub usuario_service: Arc<UsuarioService>,
    pub estado_service: Arc<EstadoService>,
    pub documentacion_service: Arc<DocumentacionService>,
    pub recurso_service: Arc<RecursoService>,
    pub entidad_service: Arc<EntidadService>,
    pub asignacion_service: Arc<AsignacionService>,
    pub vencimiento_service: Arc<VencimientoService>,
    pub dashboard_service: Arc<DashboardService>,
    pub reporte_service: Arc<ReporteService>,
    pub archivo_service: Arc<ArchivoService>,
    pub storage: Arc<dyn FileStorage>,
}

impl AppState {
    pub fn new(
        repos: Repositories,
        storage: Arc<dyn FileStorage>,
        settings: &ServiceSettings,
    ) -> Self {
        let vencimiento_service = Arc::new(VencimientoService::new(
            repos.vencimientos.clone(),
            repos.estados.clone(),
            settings.estados.clone(),
        ));

        let asignacion_service = Arc::new(AsignacionService::new(
            repos.asignaciones.clone(),
            repos.documentaciones.clone(),
            repos.recursos.clone(),
            repos.entidades.clone(),
            repos.estados.clone(),
            vencimiento_service.clone(),
        ));

        Self {
            auth_service: Arc::new(AuthService::new(
                repos.usuarios.clone(),
                &settings.jwt_secret,
                settings.jwt_expiration_hours,
                settings.allow_registration,
            )),
            usuario_service: Arc::new(UsuarioService::new(repos.usuarios.clone())),
            estado_service: Arc::new(EstadoService::new(repos.estados.clone())),
            documentacion_service: Arc::new(DocumentacionService::new(
                repos.documentaciones.clone(),
                repos.estados.clone(),
                vencimiento_service.clone(),
            )),
            recurso_service: Arc::new(RecursoService::new(
                repos.recursos.clone(),
                repos.vinculos.clone(),
                repos.estados.clone(),
            )),
            entidad_service: Arc::new(EntidadService::new(
                repos.entidades.clone(),
                repos.vinculos.clone(),
                repos.recursos.clone(),
            )),
            dashboard_service: Arc::new(DashboardService::new(repos.vencimientos.clone())),
            reporte_service: Arc::new(ReporteService::new(
                repos.vencimientos.clone(),
                repos.entidades.clone(),
                repos.vinculos.clone(),
                asignacion_service.clone(),
            )),
            archivo_service: Arc::new(ArchivoService::new(
                repos.archivos.clone(),
                storage.clone(),
                settings.max_upload_bytes,
            )),
            asignacion_service,
            vencimiento_service,
            storage,
        }
    }
}
