//! Argon2-based implementation of the `PasswordHasher` port.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;

use domains::ports::PasswordHasher;
use domains::{DomainError, Result};

#[derive(Debug, Clone, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    /// Hashes with a fresh random salt; the salt travels inside the PHC
    /// string, so verification needs no separate storage.
    async fn hash(&self, plain: &str) -> Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| DomainError::Internal(format!("password hash failed: {e}")))?;
        Ok(hash.to_string())
    }

    /// A stored hash that fails to parse verifies as false, the same
    /// outcome as a wrong password.
    async fn verify(&self, plain: &str, hash: &str) -> Result<bool> {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return Ok(false);
        };
        Ok(Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_never_equals_the_plaintext() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("password123").await.unwrap();
        assert_ne!(hash, "password123");
        assert!(hash.starts_with("$argon2"));
    }

    #[tokio::test]
    async fn original_plaintext_verifies() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("password123").await.unwrap();
        assert!(hasher.verify("password123", &hash).await.unwrap());
        assert!(!hasher.verify("password124", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn same_password_hashes_differently_each_time() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("password123").await.unwrap();
        let second = hasher.hash("password123").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn malformed_stored_hash_verifies_false() {
        let hasher = Argon2PasswordHasher::new();
        assert!(!hasher.verify("password123", "not-a-phc-string").await.unwrap());
    }
}
