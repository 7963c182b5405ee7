//! Authentication service: login, registration and JWT handling.

use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::entities::{CurrentUser, NewUsuario, Rol, UpdateUsuario, Usuario};
use crate::domain::repositories::UsuarioRepository;
use crate::error::AppError;
use crate::utils::password::{hash_password, verify_password};

/// JWT claims issued on login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: i64,
    pub username: String,
    pub rol: Rol,
    pub iat: i64,
    pub exp: i64,
}

/// Self-registration input. The password is plain text.
#[derive(Debug, Clone)]
pub struct Registro {
    pub username: String,
    pub email: String,
    pub password: String,
    pub nombre: String,
    pub apellido: String,
}

/// Service for authenticating users with passwords and bearer tokens.
///
/// Tokens are HS256 JWTs signed with `JWT_SECRET`. Every authenticated
/// request reloads the user so deactivation takes effect immediately.
pub struct AuthService {
    usuarios: Arc<dyn UsuarioRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
    allow_registration: bool,
}

impl AuthService {
    pub fn new(
        usuarios: Arc<dyn UsuarioRepository>,
        jwt_secret: &str,
        expiration_hours: i64,
        allow_registration: bool,
    ) -> Self {
        Self {
            usuarios,
            encoding_key: EncodingKey::from_secret(jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(jwt_secret.as_bytes()),
            expiration_hours,
            allow_registration,
        }
    }

    fn invalid_credentials() -> AppError {
        metrics::counter!("axioma_login_fallidos_total").increment(1);
        AppError::unauthorized("Invalid credentials", json!({}))
    }

    /// Issues a signed token for a user.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    pub fn issue_token(&self, usuario: &Usuario) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: usuario.id,
            username: usuario.username.clone(),
            rol: usuario.rol,
            iat: now.timestamp(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Token signing failed");
            AppError::internal("Token signing failed", json!({}))
        })
    }

    /// Validates signature and expiration of a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, tampered or expired tokens.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                AppError::unauthorized(
                    "Unauthorized",
                    json!({ "reason": "Invalid or expired token", "error": e.to_string() }),
                )
            })
    }

    /// Authenticates with username (or e-mail) and password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] with the same message for unknown
    /// users, inactive users and wrong passwords.
    pub async fn login(&self, login: &str, password: &str) -> Result<(String, Usuario), AppError> {
        let Some(usuario) = self.usuarios.find_by_login(login.trim()).await? else {
            warn!(login, "Login failed: unknown user");
            return Err(Self::invalid_credentials());
        };

        if !usuario.activo || !verify_password(password, &usuario.password_hash) {
            warn!(user_id = usuario.id, "Login failed");
            return Err(Self::invalid_credentials());
        }

        let token = self.issue_token(&usuario)?;
        info!(user_id = usuario.id, username = %usuario.username, "User logged in");

        Ok((token, usuario))
    }

    /// Creates a `usuario`-role account when self-registration is enabled.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Forbidden`] when registration is disabled and
    /// [`AppError::Conflict`] for a taken username or e-mail.
    pub async fn register(&self, registro: Registro) -> Result<Usuario, AppError> {
        if !self.allow_registration {
            return Err(AppError::forbidden("Registration is disabled", json!({})));
        }

        let nuevo = NewUsuario {
            username: registro.username,
            email: registro.email,
            password_hash: hash_password(&registro.password)?,
            nombre: registro.nombre,
            apellido: registro.apellido,
            rol: Rol::Usuario,
        };

        let usuario = self.usuarios.create(nuevo).await?;
        info!(user_id = usuario.id, username = %usuario.username, "User registered");

        Ok(usuario)
    }

    /// Resolves a bearer token to the active user it belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for invalid tokens and for users
    /// that no longer exist or are inactive.
    pub async fn authenticate(&self, token: &str) -> Result<CurrentUser, AppError> {
        let claims = self.verify_token(token)?;

        match self.usuarios.find_by_id(claims.sub).await? {
            Some(usuario) if usuario.activo => Ok(CurrentUser::from(&usuario)),
            _ => Err(AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "User is inactive or no longer exists" }),
            )),
        }
    }

    pub async fn me(&self, user_id: i64) -> Result<Usuario, AppError> {
        self.usuarios
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Usuario not found", json!({ "id": user_id })))
    }

    /// Changes the caller's password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `actual` is wrong.
    pub async fn change_password(
        &self,
        user_id: i64,
        actual: &str,
        nuevo: &str,
    ) -> Result<(), AppError> {
        let usuario = self.me(user_id).await?;

        if !verify_password(actual, &usuario.password_hash) {
            return Err(AppError::bad_request(
                "Current password is incorrect",
                json!({ "field": "password_actual" }),
            ));
        }

        let cambios = UpdateUsuario {
            password_hash: Some(hash_password(nuevo)?),
            ..Default::default()
        };
        self.usuarios.update(user_id, cambios).await?;
        info!(user_id, "Password changed");

        Ok(())
    }
}
