//! Operator login/logout endpoints.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    middleware::auth::AuthGuard,
    model::api::{LoginDto, MessageDto, TokenDto},
    state::AppState,
};
use crate::error::AppError;

/// POST /api/auth/login
/// Exchange the operator password for a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(dto): Json<LoginDto>,
) -> Result<impl IntoResponse, AppError> {
    let token = state.admin_sessions.login(&dto.password).await?;

    tracing::info!("Operator login successful");
    Ok((StatusCode::OK, Json(TokenDto { token })))
}

/// POST /api/auth/logout
/// End the current operator session.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    let token = AuthGuard::new(&state.admin_sessions)
        .require(&headers)
        .await?;

    state.admin_sessions.logout(&token).await;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Logged out successfully".to_string(),
        }),
    ))
}
