//! Utility functions shared by services, DTOs and the admin CLI.
//!
//! - [`password`] - Argon2id password hashing
//! - [`validation`] - CUIT/CUIL check digits and field patterns

pub mod password;
pub mod validation;
