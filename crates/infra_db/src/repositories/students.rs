//! Student repository implementation

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use domain_enrollment::Student;

use crate::error::DatabaseError;

/// Repository for student records
#[derive(Debug, Clone)]
pub struct StudentRepository {
    pool: PgPool,
}

impl StudentRepository {
    /// Creates a new StudentRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new student
    ///
    /// # Arguments
    ///
    /// * `student` - The validated student entity
    ///
    /// # Returns
    ///
    /// The stored row. A duplicate email surfaces as
    /// `DatabaseError::DuplicateEntry`.
    pub async fn insert(&self, student: &Student) -> Result<StudentRow, DatabaseError> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
            INSERT INTO students (
                student_id, first_name, last_name, email, phone,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING
                student_id, first_name, last_name, email, phone,
                created_at, updated_at
            "#,
        )
        .bind(student.id.as_uuid())
        .bind(&student.first_name)
        .bind(&student.last_name)
        .bind(&student.email)
        .bind(&student.phone)
        .bind(student.created_at)
        .bind(student.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a student by identifier
    ///
    /// # Arguments
    ///
    /// * `student_id` - The student identifier
    ///
    /// # Returns
    ///
    /// The student row or a NotFound error
    pub async fn get_by_id(&self, student_id: Uuid) -> Result<StudentRow, DatabaseError> {
        let student = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT
                student_id, first_name, last_name, email, phone,
                created_at, updated_at
            FROM students
            WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Student", student_id))?;

        Ok(student)
    }

    /// Lists all students ordered by name
    pub async fn list(&self) -> Result<Vec<StudentRow>, DatabaseError> {
        let students = sqlx::query_as::<_, StudentRow>(
            r#"
            SELECT
                student_id, first_name, last_name, email, phone,
                created_at, updated_at
            FROM students
            ORDER BY last_name, first_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(students)
    }
}

// ============================================================================
// Row types
// ============================================================================

/// Database row representation of a student
#[derive(Debug, Clone, FromRow)]
pub struct StudentRow {
    pub student_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
