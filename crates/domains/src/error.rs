//! # DomainError
//!
//! Centralized error handling for rusty-blog. Every operation either fully
//! succeeds or reports exactly one of these; the message is what callers see.

use thiserror::Error;

/// The primary error type for all domain operations.
#[derive(Error, Debug)]
pub enum DomainError {
    /// Missing or invalid input (mapped to 400)
    #[error("{0}")]
    Validation(String),

    /// Referenced Post/Comment/User absent (mapped to 404)
    #[error("{0}")]
    NotFound(String),

    /// Authenticated but not the required owner (mapped to 403)
    #[error("{0}")]
    Forbidden(String),

    /// Missing or invalid token (mapped to 401)
    #[error("{0}")]
    Unauthorized(String),

    /// Login failure. One variant for both unknown email and wrong
    /// password, so the two causes stay indistinguishable to the caller.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Resource already exists (mapped to 400, matching the register flow)
    #[error("{0}")]
    Conflict(String),

    /// Infrastructure failure (store unreachable, hash error; mapped to 500)
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for rusty-blog logic.
pub type Result<T> = std::result::Result<T, DomainError>;
