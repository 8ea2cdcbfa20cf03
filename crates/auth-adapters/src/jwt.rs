//! HMAC-signed, time-limited identity tokens (`TokenIssuer` port).

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use domains::ports::TokenIssuer;
use domains::{DomainError, Result, UserId};

const TOKEN_TTL_DAYS: i64 = 30;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies with a single shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtTokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    fn issue_with_ttl(&self, user: UserId, ttl_days: i64) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::days(ttl_days)).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| DomainError::Internal(format!("token signing failed: {e}")))
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, user: UserId) -> Result<String> {
        self.issue_with_ttl(user, TOKEN_TTL_DAYS)
    }

    /// Malformed, expired and wrong-signature tokens all map to the same
    /// Unauthorized outcome; callers never learn which check failed.
    fn verify(&self, token: &str) -> Result<UserId> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .map_err(|_| token_failed())?;
        data.claims.sub.parse().map_err(|_| token_failed())
    }
}

fn token_failed() -> DomainError {
    DomainError::Unauthorized("Not authorized, token failed".into())
}
