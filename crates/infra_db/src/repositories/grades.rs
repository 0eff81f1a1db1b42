//! Grade repository implementation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{EnrollmentId, GradeId};
use domain_assessment::Grade;

use crate::error::DatabaseError;

/// Repository for grade records
#[derive(Debug, Clone)]
pub struct GradeRepository {
    pool: PgPool,
}

impl GradeRepository {
    /// Creates a new GradeRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new grade
    ///
    /// # Arguments
    ///
    /// * `grade` - The validated grade entity
    pub async fn insert(&self, grade: &Grade) -> Result<GradeRow, DatabaseError> {
        let row = sqlx::query_as::<_, GradeRow>(
            r#"
            INSERT INTO grades (
                grade_id, enrollment_id, subject, value, max_value,
                weight, graded_at, created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                grade_id, enrollment_id, subject, value, max_value,
                weight, graded_at, created_at
            "#,
        )
        .bind(grade.id.as_uuid())
        .bind(grade.enrollment_id.as_uuid())
        .bind(&grade.subject)
        .bind(grade.value)
        .bind(grade.max_value)
        .bind(grade.weight)
        .bind(grade.graded_at)
        .bind(grade.created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Lists the grades of an enrollment in recording order
    ///
    /// # Arguments
    ///
    /// * `enrollment_id` - The enrollment identifier
    pub async fn list_for_enrollment(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Vec<GradeRow>, DatabaseError> {
        let grades = sqlx::query_as::<_, GradeRow>(
            r#"
            SELECT
                grade_id, enrollment_id, subject, value, max_value,
                weight, graded_at, created_at
            FROM grades
            WHERE enrollment_id = $1
            ORDER BY created_at
            "#,
        )
        .bind(enrollment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(grades)
    }
}

// ============================================================================
// Row types
// ============================================================================

/// Database row representation of a grade
#[derive(Debug, Clone, FromRow)]
pub struct GradeRow {
    pub grade_id: Uuid,
    pub enrollment_id: Uuid,
    pub subject: String,
    pub value: Decimal,
    pub max_value: Decimal,
    pub weight: Decimal,
    pub graded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<GradeRow> for Grade {
    fn from(row: GradeRow) -> Self {
        Grade {
            id: GradeId::from(row.grade_id),
            enrollment_id: EnrollmentId::from(row.enrollment_id),
            subject: row.subject,
            value: row.value,
            max_value: row.max_value,
            weight: row.weight,
            graded_at: row.graded_at,
            created_at: row.created_at,
        }
    }
}
