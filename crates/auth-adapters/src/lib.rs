//! # auth-adapters
//!
//! Credential and token implementations behind the `domains` ports:
//! Argon2 password hashing, and HMAC-signed time-limited identity tokens
//! behind the `auth-jwt` feature.

pub mod password;

#[cfg(feature = "auth-jwt")]
pub mod jwt;

pub use password::Argon2PasswordHasher;

#[cfg(feature = "auth-jwt")]
pub use jwt::JwtTokenService;
