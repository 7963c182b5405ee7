//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. They
//! are implemented by the PostgreSQL repositories in
//! `crate::infrastructure::persistence`; mocks are generated with `mockall`
//! for service and handler tests.
//!
//! # Available Repositories
//!
//! - [`UsuarioRepository`] - User accounts
//! - [`EstadoRepository`] - Status labels
//! - [`DocumentacionRepository`] - Document types
//! - [`RecursoRepository`] - People
//! - [`EntidadRepository`] - Organizations
//! - [`AsignacionRepository`] - Document assignments of recursos and entidades
//! - [`VinculoRepository`] - Entidad ↔ recurso links
//! - [`VencimientoRepository`] - Expiration job, dashboard and report queries
//! - [`ArchivoRepository`] - Attachment metadata
//!
//! # Testing
//!
//! See integration tests in `tests/repository_*.rs` for usage examples.

pub mod archivo_repository;
pub mod asignacion_repository;
pub mod documentacion_repository;
pub mod entidad_repository;
pub mod estado_repository;
pub mod recurso_repository;
pub mod usuario_repository;
pub mod vencimiento_repository;
pub mod vinculo_repository;

pub use archivo_repository::ArchivoRepository;
pub use asignacion_repository::AsignacionRepository;
pub use documentacion_repository::DocumentacionRepository;
pub use entidad_repository::EntidadRepository;
pub use estado_repository::EstadoRepository;
pub use recurso_repository::RecursoRepository;
pub use usuario_repository::UsuarioRepository;
pub use vencimiento_repository::VencimientoRepository;
pub use vinculo_repository::VinculoRepository;

#[cfg(test)]
pub use archivo_repository::MockArchivoRepository;
#[cfg(test)]
pub use asignacion_repository::MockAsignacionRepository;
#[cfg(test)]
pub use documentacion_repository::MockDocumentacionRepository;
#[cfg(test)]
pub use entidad_repository::MockEntidadRepository;
#[cfg(test)]
pub use estado_repository::MockEstadoRepository;
#[cfg(test)]
pub use recurso_repository::MockRecursoRepository;
#[cfg(test)]
pub use usuario_repository::MockUsuarioRepository;
#[cfg(test)]
pub use vencimiento_repository::MockVencimientoRepository;
#[cfg(test)]
pub use vinculo_repository::MockVinculoRepository;

/// Paging window and optional search term for list queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub offset: i64,
    pub limit: i64,
}

impl ListQuery {
    pub fn new(search: Option<String>, offset: i64, limit: i64) -> Self {
        Self {
            search,
            offset,
            limit,
        }
    }

    /// The search term as an `ILIKE` pattern, or `None` when absent/blank.
    pub fn pattern(&self) -> Option<String> {
        search_pattern(self.search.as_deref())
    }
}

/// Builds a case-insensitive substring pattern, escaping `\`, `%` and `_`.
pub fn search_pattern(search: Option<&str>) -> Option<String> {
    let term = search.map(str::trim).filter(|s| !s.is_empty())?;

    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');

    Some(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_pattern_escapes_wildcards() {
        assert_eq!(search_pattern(Some("50%_a")).as_deref(), Some("%50\\%\\_a%"));
    }

    #[test]
    fn test_blank_search_is_none() {
        assert_eq!(search_pattern(Some("   ")), None);
        assert_eq!(ListQuery::default().pattern(), None);
    }
}
