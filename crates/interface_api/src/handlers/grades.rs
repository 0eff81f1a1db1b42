//! Grade handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::EnrollmentId;
use domain_assessment::{weighted_average, Grade};
use infra_db::repositories::{EnrollmentRepository, GradeRepository};

use crate::dto::grades::{GradeAverageResponse, GradeResponse, RecordGradeRequest};
use crate::{error::ApiError, AppState};

/// Records a grade against an enrollment
///
/// The enrollment must exist (404 otherwise). Rejects a
/// non-positive `max_value`, a negative `value`, or a negative
/// `weight` (400).
pub async fn record_grade(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordGradeRequest>,
) -> Result<(StatusCode, Json<GradeResponse>), ApiError> {
    request.validate()?;

    let enrollments = EnrollmentRepository::new(state.pool.clone());
    enrollments.get_by_id(id).await?;

    let mut grade = Grade::new(
        EnrollmentId::from(id),
        request.subject,
        request.value,
        request.max_value,
        request.weight,
    )?;
    if let Some(graded_at) = request.graded_at {
        grade = grade.with_graded_at(graded_at);
    }

    let repository = GradeRepository::new(state.pool.clone());
    let row = repository.insert(&grade).await?;

    Ok((StatusCode::CREATED, Json(GradeResponse::from(row))))
}

/// Lists the grades of an enrollment
pub async fn list_grades(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<GradeResponse>>, ApiError> {
    let enrollments = EnrollmentRepository::new(state.pool.clone());
    enrollments.get_by_id(id).await?;

    let repository = GradeRepository::new(state.pool.clone());
    let rows = repository.list_for_enrollment(id).await?;

    Ok(Json(rows.into_iter().map(GradeResponse::from).collect()))
}

/// Computes the weighted grade average of an enrollment
///
/// `average` is `null` when the enrollment has no grades or all
/// weights are zero.
pub async fn grade_average(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<GradeAverageResponse>, ApiError> {
    let enrollments = EnrollmentRepository::new(state.pool.clone());
    enrollments.get_by_id(id).await?;

    let repository = GradeRepository::new(state.pool.clone());
    let grades: Vec<Grade> = repository
        .list_for_enrollment(id)
        .await?
        .into_iter()
        .map(Grade::from)
        .collect();

    Ok(Json(GradeAverageResponse {
        enrollment_id: id,
        grade_count: grades.len(),
        average: weighted_average(&grades),
    }))
}
