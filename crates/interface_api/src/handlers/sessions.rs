//! Session handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_enrollment::Session;
use infra_db::repositories::SessionRepository;

use crate::dto::sessions::{CreateSessionRequest, SessionResponse};
use crate::{error::ApiError, AppState};

/// Creates a new training session
///
/// Rejects end dates before the start date (400) and duplicate
/// session codes (409).
pub async fn create_session(
    State(state): State<AppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    request.validate()?;

    let session = Session::new(
        request.code,
        request.title,
        request.start_date,
        request.end_date,
        Money::new(request.price),
    )?;

    let repository = SessionRepository::new(state.pool.clone());
    let row = repository.insert(&session).await?;

    Ok((StatusCode::CREATED, Json(SessionResponse::from(row))))
}

/// Lists sessions
pub async fn list_sessions(
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionResponse>>, ApiError> {
    let repository = SessionRepository::new(state.pool.clone());
    let rows = repository.list().await?;

    Ok(Json(rows.into_iter().map(SessionResponse::from).collect()))
}

/// Gets a session by ID
pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let repository = SessionRepository::new(state.pool.clone());
    let row = repository.get_by_id(id).await?;

    Ok(Json(SessionResponse::from(row)))
}
