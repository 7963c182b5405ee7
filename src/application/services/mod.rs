//! Business logic services for the application layer.

pub mod archivo_service;
pub mod asignacion_service;
pub mod auth_service;
pub mod dashboard_service;
pub mod documentacion_service;
pub mod entidad_service;
pub mod estado_service;
pub mod recurso_service;
pub mod reporte_service;
pub mod usuario_service;
pub mod vencimiento_service;

pub use archivo_service::ArchivoService;
pub use asignacion_service::AsignacionService;
pub use auth_service::AuthService;
pub use dashboard_service::DashboardService;
pub use documentacion_service::DocumentacionService;
pub use entidad_service::EntidadService;
pub use estado_service::EstadoService;
pub use recurso_service::RecursoService;
pub use reporte_service::ReporteService;
pub use usuario_service::UsuarioService;
pub use vencimiento_service::VencimientoService;
