//! Enrollment handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::{Money, SessionId, StudentId};
use domain_enrollment::Enrollment;
use infra_db::repositories::{EnrollmentRepository, SessionRepository, StudentRepository};

use crate::dto::enrollments::{CreateEnrollmentRequest, EnrollmentResponse};
use crate::{error::ApiError, AppState};

/// Creates a new enrollment
///
/// The student and session must both exist (404 otherwise). When
/// `total_amount` is omitted the session's catalog price is charged.
/// A second enrollment of the same student in the same session is a
/// conflict (409).
pub async fn create_enrollment(
    State(state): State<AppState>,
    Json(request): Json<CreateEnrollmentRequest>,
) -> Result<(StatusCode, Json<EnrollmentResponse>), ApiError> {
    let students = StudentRepository::new(state.pool.clone());
    let sessions = SessionRepository::new(state.pool.clone());

    students.get_by_id(request.student_id).await?;
    let session = sessions.get_by_id(request.session_id).await?;

    let total = Money::new(request.total_amount.unwrap_or(session.price));
    let enrollment = Enrollment::new(
        StudentId::from(request.student_id),
        SessionId::from(request.session_id),
        total,
    )?;

    let repository = EnrollmentRepository::new(state.pool.clone());
    let row = repository.insert(&enrollment).await?;

    Ok((StatusCode::CREATED, Json(EnrollmentResponse::from(row))))
}

/// Lists enrollments
pub async fn list_enrollments(
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrollmentResponse>>, ApiError> {
    let repository = EnrollmentRepository::new(state.pool.clone());
    let rows = repository.list().await?;

    Ok(Json(rows.into_iter().map(EnrollmentResponse::from).collect()))
}

/// Gets an enrollment by ID, including its outstanding balance
pub async fn get_enrollment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<EnrollmentResponse>, ApiError> {
    let repository = EnrollmentRepository::new(state.pool.clone());
    let row = repository.get_by_id(id).await?;

    Ok(Json(EnrollmentResponse::from(row)))
}
