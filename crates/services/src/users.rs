//! Identity and sessions: registration, login, token authentication.

use std::sync::Arc;

use tracing::info;

use domains::ports::{PasswordHasher, TokenIssuer, UserRepo};
use domains::{DomainError, Result, User, UserId};

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepo>,
    passwords: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenIssuer>,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepo>,
        passwords: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Creates an account and issues its first token.
    ///
    /// The duplicate check spans username and email with OR semantics; a hit
    /// on either rejects the registration.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(User, String)> {
        let username = username.trim();
        let email = email.trim().to_lowercase();
        if username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(DomainError::Validation("All fields are required".into()));
        }

        if self
            .users
            .find_by_username_or_email(username, &email)
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict("User already exists".into()));
        }

        let hash = self.passwords.hash(password).await?;
        let user = User::new(username.to_owned(), email, hash);
        self.users.insert(user.clone()).await?;

        let token = self.tokens.issue(user.id)?;
        info!(user = %user.id, username = %user.username, "registered user");
        Ok((user, token))
    }

    /// Verifies credentials and issues a fresh token.
    ///
    /// Unknown email and wrong password return the same error, so callers
    /// cannot enumerate accounts.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let email = email.trim().to_lowercase();
        let Some(user) = self.users.find_by_email(&email).await? else {
            return Err(DomainError::InvalidCredentials);
        };

        if !self.passwords.verify(password, &user.password_hash).await? {
            return Err(DomainError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id)?;
        Ok((user, token))
    }

    /// Resolves a presented token to its user. Every verification failure,
    /// including a token whose subject no longer resolves, collapses to the
    /// same Unauthorized outcome.
    pub async fn authenticate(&self, token: &str) -> Result<User> {
        let id = self
            .tokens
            .verify(token)
            .map_err(|_| token_failed())?;
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(token_failed)
    }

    pub async fn profile(&self, id: UserId) -> Result<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("User not found".into()))
    }
}

fn token_failed() -> DomainError {
    DomainError::Unauthorized("Not authorized, token failed".into())
}
