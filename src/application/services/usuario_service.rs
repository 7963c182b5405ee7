//! User administration service.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::entities::{CurrentUser, NewUsuario, Rol, UpdateUsuario, Usuario};
use crate::domain::repositories::{ListQuery, UsuarioRepository};
use crate::error::AppError;
use crate::utils::password::hash_password;

/// Account creation input. The password is plain text.
#[derive(Debug, Clone)]
pub struct NuevoUsuario {
    pub username: String,
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub apellido: String,
    pub rol: Rol,
}

/// Partial account update. A new password is hashed before storage.
#[derive(Debug, Clone, Default)]
pub struct CambiosUsuario {
    pub email: Option<String>,
    pub nombre: Option<String>,
    pub apellido: Option<String>,
    pub rol: Option<Rol>,
    pub activo: Option<bool>,
    pub password: Option<String>,
}

pub struct UsuarioService {
    usuarios: Arc<dyn UsuarioRepository>,
}

impl UsuarioService {
    pub fn new(usuarios: Arc<dyn UsuarioRepository>) -> Self {
        Self { usuarios }
    }

    pub async fn list(&self, query: ListQuery) -> Result<Vec<Usuario>, AppError> {
        self.usuarios.list(query).await
    }

    pub async fn count(&self, search: Option<String>) -> Result<i64, AppError> {
        self.usuarios.count(search).await
    }

    pub async fn get(&self, id: i64) -> Result<Usuario, AppError> {
        self.usuarios
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Usuario not found", json!({ "id": id })))
    }

    pub async fn create(&self, nuevo: NuevoUsuario) -> Result<Usuario, AppError> {
        let usuario = self
            .usuarios
            .create(NewUsuario {
                username: nuevo.username,
                email: nuevo.email,
                password_hash: hash_password(&nuevo.password)?,
                nombre: nuevo.nombre,
                apellido: nuevo.apellido,
                rol: nuevo.rol,
            })
            .await?;

        info!(id = usuario.id, username = %usuario.username, rol = %usuario.rol, "Usuario created");
        Ok(usuario)
    }

    /// Updates an account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when `actor` tries to deactivate
    /// their own account and [`AppError::NotFound`] for unknown ids.
    pub async fn update(
        &self,
        id: i64,
        cambios: CambiosUsuario,
        actor: &CurrentUser,
    ) -> Result<Usuario, AppError> {
        if cambios.activo == Some(false) {
            Self::ensure_not_self(id, actor)?;
        }

        let password_hash = cambios.password.as_deref().map(hash_password).transpose()?;

        let usuario = self
            .usuarios
            .update(
                id,
                UpdateUsuario {
                    email: cambios.email,
                    nombre: cambios.nombre,
                    apellido: cambios.apellido,
                    rol: cambios.rol,
                    activo: cambios.activo,
                    password_hash,
                },
            )
            .await?;

        info!(id, actor = actor.id, "Usuario updated");
        Ok(usuario)
    }

    /// Soft-deletes an account by clearing `activo`.
    pub async fn deactivate(&self, id: i64, actor: &CurrentUser) -> Result<(), AppError> {
        Self::ensure_not_self(id, actor)?;

        let usuario = self.get(id).await?;
        if !usuario.activo {
            return Err(AppError::not_found(
                "Usuario not found",
                json!({ "id": id, "reason": "already inactive" }),
            ));
        }

        self.usuarios
            .update(
                id,
                UpdateUsuario {
                    activo: Some(false),
                    ..Default::default()
                },
            )
            .await?;

        info!(id, actor = actor.id, "Usuario deactivated");
        Ok(())
    }

    fn ensure_not_self(id: i64, actor: &CurrentUser) -> Result<(), AppError> {
        if id == actor.id {
            return Err(AppError::bad_request(
                "You cannot deactivate your own account",
                json!({ "id": id }),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockUsuarioRepository;
    use crate::test_support::{admin, usuario};

    #[tokio::test]
    async fn test_create_hashes_password() {
        let mut mock = MockUsuarioRepository::new();
        mock.expect_create()
            .withf(|n| n.password_hash != "plain-password" && n.password_hash.starts_with("$argon2id$"))
            .times(1)
            .returning(|n| {
                let mut u = usuario(10);
                u.username = n.username;
                u.rol = n.rol;
                Ok(u)
            });

        let service = UsuarioService::new(Arc::new(mock));
        let created = service
            .create(NuevoUsuario {
                username: "operador".to_string(),
                email: "op@example.com".to_string(),
                password: "plain-password".to_string(),
                nombre: "Op".to_string(),
                apellido: "Erador".to_string(),
                rol: Rol::Admin,
            })
            .await
            .unwrap();

        assert_eq!(created.username, "operador");
        assert_eq!(created.rol, Rol::Admin);
    }

    #[tokio::test]
    async fn test_cannot_deactivate_self() {
        let mut mock = MockUsuarioRepository::new();
        mock.expect_update().never();

        let service = UsuarioService::new(Arc::new(mock));
        let actor = admin(1);

        let err = service.deactivate(1, &actor).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let err = service
            .update(
                1,
                CambiosUsuario {
                    activo: Some(false),
                    ..Default::default()
                },
                &actor,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_deactivate_other_user() {
        let mut mock = MockUsuarioRepository::new();
        mock.expect_find_by_id()
            .returning(|id| Ok(Some(usuario(id))));
        mock.expect_update()
            .withf(|id, c| *id == 2 && c.activo == Some(false))
            .times(1)
            .returning(|id, _| {
                let mut u = usuario(id);
                u.activo = false;
                Ok(u)
            });

        let service = UsuarioService::new(Arc::new(mock));
        service.deactivate(2, &admin(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let mut mock = MockUsuarioRepository::new();
        mock.expect_find_by_id().returning(|_| Ok(None));

        let service = UsuarioService::new(Arc::new(mock));
        assert!(matches!(
            service.get(99).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
