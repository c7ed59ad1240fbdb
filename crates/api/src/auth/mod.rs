//! Authentication primitives.
//!
//! - [`password`] -- Argon2id PIN hashing and verification.
//! - [`jwt`] -- session token generation and validation.

pub mod jwt;
pub mod password;
