//! Operator endpoints for game session signups.

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppError,
    middleware::auth::AuthGuard,
    model::{
        api::{
            CreateSignupDto, CreatedSignupDto, MessageDto, NotifyDetailDto, NotifyPlayersDto,
            NotifyReportDto, SignupSummaryDto,
        },
        session::{CreateSessionParams, GameSession},
    },
    state::AppState,
};

const MAX_PLAYER_CAP: u32 = 100;
const MAX_SUBJECT_LENGTH: usize = 100;
const MAX_MESSAGE_LENGTH: usize = 2000;

/// POST /api/signups
/// Post a signup announcement and start tracking the session.
pub async fn create_signup(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(dto): Json<CreateSignupDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_sessions)
        .require(&headers)
        .await?;

    if dto.name.trim().is_empty() {
        return Err(AppError::BadRequest("Game name is required".to_string()));
    }
    if dto.scheduled_time.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Scheduled time is required".to_string(),
        ));
    }
    if let Some(max_players) = dto.max_players {
        if !(1..=MAX_PLAYER_CAP).contains(&max_players) {
            return Err(AppError::BadRequest(format!(
                "Max players must be between 1 and {}",
                MAX_PLAYER_CAP
            )));
        }
    }

    let session = state
        .coordinator
        .create_signup(CreateSessionParams {
            name: dto.name.trim().to_string(),
            scheduled_time: dto.scheduled_time.trim().to_string(),
            description: dto.description,
            max_players: dto.max_players,
            notify_all: dto.notify_all,
            notify_role: dto.notify_role,
        })
        .await?;

    Ok((
        StatusCode::OK,
        Json(CreatedSignupDto {
            message: "Game signup created successfully".to_string(),
            message_id: session.message_id,
        }),
    ))
}

/// GET /api/signups
/// List all tracked signups in creation order.
pub async fn list_signups(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_sessions)
        .require(&headers)
        .await?;

    let summaries: Vec<SignupSummaryDto> = state
        .coordinator
        .list_signups()
        .await
        .into_iter()
        .map(summary_dto)
        .collect();

    Ok((StatusCode::OK, Json(summaries)))
}

/// POST /api/signups/{message_id}/start
/// Mark a scheduled session as started.
pub async fn mark_started(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<u64>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_sessions)
        .require(&headers)
        .await?;

    let session = state.coordinator.mark_started(message_id).await?;

    tracing::info!("Game marked as started via dashboard: {}", message_id);
    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: format!("Game \"{}\" marked as started", session.name),
        }),
    ))
}

/// POST /api/signups/{message_id}/notify
/// Send a direct message to every signed-up player.
pub async fn notify_players(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<u64>,
    Json(dto): Json<NotifyPlayersDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_sessions)
        .require(&headers)
        .await?;

    if dto.subject.trim().is_empty() || dto.message.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Subject and message content are required".to_string(),
        ));
    }
    if dto.subject.len() > MAX_SUBJECT_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Subject must be {} characters or less",
            MAX_SUBJECT_LENGTH
        )));
    }
    if dto.message.len() > MAX_MESSAGE_LENGTH {
        return Err(AppError::BadRequest(format!(
            "Message must be {} characters or less",
            MAX_MESSAGE_LENGTH
        )));
    }

    let report = state
        .coordinator
        .notify_players(message_id, &dto.subject, &dto.message)
        .await?;

    if !report.success() {
        tracing::warn!(
            "Game DM fan-out for signup {} delivered to no one ({} failed)",
            message_id,
            report.failed_count
        );
        return Err(AppError::BadRequest(
            "Failed to send DM to any player(s)".to_string(),
        ));
    }

    tracing::info!(
        "DM sent to {} players for game signup {}",
        report.sent_count,
        message_id
    );

    Ok((
        StatusCode::OK,
        Json(NotifyReportDto {
            message: format!("Successfully sent DM to {} player(s)", report.sent_count),
            sent_count: report.sent_count,
            failed_count: report.failed_count,
            details: report
                .details
                .into_iter()
                .map(|d| NotifyDetailDto {
                    user_id: d.participant_id,
                    display_name: d.display_name,
                    delivered: d.delivered,
                    error: d.error,
                })
                .collect(),
        }),
    ))
}

fn summary_dto(session: GameSession) -> SignupSummaryDto {
    SignupSummaryDto {
        message_id: session.message_id,
        player_count: session.player_count(),
        max_players: session.max_players,
        status: session.status.label().to_string(),
        name: session.name,
        scheduled_time: session.scheduled_time,
        created_at: session.created_at,
    }
}
