use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use domains::{DomainError, User};

use super::error::ApiError;
use super::state::AppState;

/// The authenticated caller, resolved from `Authorization: Bearer <token>`.
///
/// A missing token and a present-but-invalid one are distinct outcomes here
/// at the transport boundary; past this point only the user remains.
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .ok_or_else(|| {
                ApiError(DomainError::Unauthorized("Not authorized, no token".into()))
            })?;

        let user = state.users.authenticate(token).await?;
        Ok(CurrentUser(user))
    }
}
