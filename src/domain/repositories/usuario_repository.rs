//! Repository trait for user accounts.

use async_trait::async_trait;

use super::ListQuery;
use crate::domain::entities::{NewUsuario, UpdateUsuario, Usuario};
use crate::error::AppError;

/// Repository interface for user accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUsuarioRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    /// Creates a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username or e-mail is taken.
    async fn create(&self, nuevo: NewUsuario) -> Result<Usuario, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Usuario>, AppError>;

    /// Finds a user whose username or e-mail equals `login` (case-insensitive).
    async fn find_by_login(&self, login: &str) -> Result<Option<Usuario>, AppError>;

    /// Lists users ordered by username. Search covers username, email,
    /// nombre and apellido.
    async fn list(&self, query: ListQuery) -> Result<Vec<Usuario>, AppError>;

    async fn count(&self, search: Option<String>) -> Result<i64, AppError>;

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the user does not exist.
    async fn update(&self, id: i64, cambios: UpdateUsuario) -> Result<Usuario, AppError>;
}
