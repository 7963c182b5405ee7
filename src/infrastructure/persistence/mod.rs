//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx. Queries
//! are bound at runtime and decoded through `FromRow`; the schema lives in
//! `migrations/` and is applied at startup.
//!
//! # Repositories
//!
//! - [`PgUsuarioRepository`] - User accounts
//! - [`PgEstadoRepository`] - Status labels
//! - [`PgDocumentacionRepository`] - Document types
//! - [`PgRecursoRepository`] - People
//! - [`PgEntidadRepository`] - Organizations
//! - [`PgAsignacionRepository`] - Document assignments
//! - [`PgVinculoRepository`] - Entidad ↔ recurso links
//! - [`PgVencimientoRepository`] - Expiration, dashboard and report queries
//! - [`PgArchivoRepository`] - Attachment metadata

pub mod pg_archivo_repository;
pub mod pg_asignacion_repository;
pub mod pg_documentacion_repository;
pub mod pg_entidad_repository;
pub mod pg_estado_repository;
pub mod pg_recurso_repository;
pub mod pg_usuario_repository;
pub mod pg_vencimiento_repository;
pub mod pg_vinculo_repository;

pub use pg_archivo_repository::PgArchivoRepository;
pub use pg_asignacion_repository::PgAsignacionRepository;
pub use pg_documentacion_repository::PgDocumentacionRepository;
pub use pg_entidad_repository::PgEntidadRepository;
pub use pg_estado_repository::PgEstadoRepository;
pub use pg_recurso_repository::PgRecursoRepository;
pub use pg_usuario_repository::PgUsuarioRepository;
pub use pg_vencimiento_repository::PgVencimientoRepository;
pub use pg_vinculo_repository::PgVinculoRepository;
