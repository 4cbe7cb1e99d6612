//! Authentication and authorization primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- staff and mother access tokens, refresh-token helpers.

pub mod jwt;
pub mod password;
