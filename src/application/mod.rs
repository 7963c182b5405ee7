//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Login, registration and JWT handling
//! - [`services::usuario_service::UsuarioService`] - User administration
//! - [`services::estado_service::EstadoService`] - Estado catalogue
//! - [`services::documentacion_service::DocumentacionService`] - Document types
//! - [`services::recurso_service::RecursoService`] - Recursos
//! - [`services::entidad_service::EntidadService`] - Entidades and their recurso links
//! - [`services::asignacion_service::AsignacionService`] - Document assignments
//! - [`services::vencimiento_service::VencimientoService`] - Expiration estado recomputation
//! - [`services::dashboard_service::DashboardService`] - Dashboard aggregates
//! - [`services::reporte_service::ReporteService`] - Reports
//! - [`services::archivo_service::ArchivoService`] - Attachments
//!
//! [`expiration_worker`] runs the recomputation periodically.

pub mod expiration_worker;
pub mod services;
