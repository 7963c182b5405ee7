//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization and validator
//! for input validation. Domain entities are serialized directly where the
//! wire shape matches.

pub mod archivo;
pub mod asignacion;
pub mod auth;
pub mod dashboard;
pub mod documentacion;
pub mod entidad;
pub mod estado;
pub mod health;
pub mod pagination;
pub mod recurso;
pub mod usuario;
