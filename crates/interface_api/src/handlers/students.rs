//! Student handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use domain_enrollment::Student;
use infra_db::repositories::StudentRepository;

use crate::dto::students::{CreateStudentRequest, StudentResponse};
use crate::{error::ApiError, AppState};

/// Creates a new student
///
/// Returns 409 when the email is already registered.
pub async fn create_student(
    State(state): State<AppState>,
    Json(request): Json<CreateStudentRequest>,
) -> Result<(StatusCode, Json<StudentResponse>), ApiError> {
    request.validate()?;

    let mut student = Student::new(request.first_name, request.last_name, request.email);
    if let Some(phone) = request.phone {
        student = student.with_phone(phone);
    }

    let repository = StudentRepository::new(state.pool.clone());
    let row = repository.insert(&student).await?;

    Ok((StatusCode::CREATED, Json(StudentResponse::from(row))))
}

/// Lists students
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentResponse>>, ApiError> {
    let repository = StudentRepository::new(state.pool.clone());
    let rows = repository.list().await?;

    Ok(Json(rows.into_iter().map(StudentResponse::from).collect()))
}

/// Gets a student by ID
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<StudentResponse>, ApiError> {
    let repository = StudentRepository::new(state.pool.clone());
    let row = repository.get_by_id(id).await?;

    Ok(Json(StudentResponse::from(row)))
}
