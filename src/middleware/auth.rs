//! Bearer-token guard for the operator API.

use axum::http::{header, HeaderMap};

use crate::error::{auth::AuthError, AppError};
use crate::service::admin::session::AdminSessionService;

/// Guard run at the top of every protected handler.
pub struct AuthGuard<'a> {
    sessions: &'a AdminSessionService,
}

impl<'a> AuthGuard<'a> {
    pub fn new(sessions: &'a AdminSessionService) -> Self {
        Self { sessions }
    }

    /// Requires a valid operator session token on the request.
    ///
    /// # Returns
    /// - `Ok(String)` - The validated bearer token
    /// - `Err(AuthError::MissingToken)` - No `Authorization: Bearer` header
    /// - `Err(AuthError::InvalidToken)` - Token is not an active session
    pub async fn require(&self, headers: &HeaderMap) -> Result<String, AppError> {
        let Some(token) = bearer_token(headers) else {
            return Err(AuthError::MissingToken.into());
        };

        if !self.sessions.validate(token).await {
            return Err(AuthError::InvalidToken.into());
        }

        Ok(token.to_string())
    }
}

/// Extracts the bearer token from an `Authorization` header, if present.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
