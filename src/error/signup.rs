use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Domain errors for game signup operations.
///
/// Capacity violations triggered by reactions never surface through this type
/// to the reacting user; the coordinator resolves them by reverting the
/// reaction. These variants are what the operator API reports.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SignupError {
    /// No signup is tracked for the given announcement message.
    #[error("Game signup {0} not found")]
    NotFound(u64),

    /// A signup is already tracked under the given announcement message.
    #[error("A game signup already exists for message {0}")]
    DuplicateId(u64),

    /// Mark-started was attempted on a session that is no longer scheduled.
    ///
    /// Status transitions are one-directional; a second mark-started on the
    /// same session fails here rather than corrupting state.
    #[error("Game has already been started or has ended")]
    InvalidTransition,

    /// Notification requested for a session with an empty roster.
    #[error("No players are signed up for this game")]
    NoParticipants,
}

/// Converts signup errors into HTTP responses.
///
/// - `NotFound` → 404 Not Found
/// - `DuplicateId` → 409 Conflict
/// - `InvalidTransition`, `NoParticipants` → 400 Bad Request
impl IntoResponse for SignupError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateId(_) => StatusCode::CONFLICT,
            Self::InvalidTransition | Self::NoParticipants => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
