use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request did not carry a `Authorization: Bearer <token>` header.
    #[error("Missing bearer token")]
    MissingToken,

    /// Bearer token is not one of the active operator sessions.
    ///
    /// Tokens are process-lifetime; a restart invalidates all of them.
    #[error("Invalid or expired session token")]
    InvalidToken,

    /// Login attempt with a password that does not match the operator password.
    #[error("Invalid operator password")]
    InvalidPassword,
}

/// Converts authentication errors into HTTP responses.
///
/// All variants map to 401 Unauthorized. Failed login attempts are logged at
/// warn level; the client-facing message stays generic.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::MissingToken | Self::InvalidToken => "Unauthorized".to_string(),
            Self::InvalidPassword => {
                tracing::warn!("Invalid operator login attempt");
                "Invalid password".to_string()
            }
        };

        (StatusCode::UNAUTHORIZED, Json(ErrorDto { error: message })).into_response()
    }
}
