//! Enrollment repository implementation

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use core_kernel::{EnrollmentId, Money, SessionId, StudentId};
use domain_enrollment::Enrollment;

use crate::error::DatabaseError;

/// Repository for enrollment records
///
/// Only creation and reads live here. The `paid_amount` column is written
/// exclusively by the payment cascade in
/// [`BillingRepository`](crate::repositories::BillingRepository), inside
/// the same transaction that mutates payments.
#[derive(Debug, Clone)]
pub struct EnrollmentRepository {
    pool: PgPool,
}

impl EnrollmentRepository {
    /// Creates a new EnrollmentRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new enrollment
    ///
    /// # Arguments
    ///
    /// * `enrollment` - The validated enrollment entity
    ///
    /// # Returns
    ///
    /// The stored row. Enrolling the same student twice in one session
    /// surfaces as `DatabaseError::DuplicateEntry`; a missing student or
    /// session as `DatabaseError::ForeignKeyViolation`.
    pub async fn insert(&self, enrollment: &Enrollment) -> Result<EnrollmentRow, DatabaseError> {
        let row = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            INSERT INTO enrollments (
                enrollment_id, student_id, session_id, total_amount,
                paid_amount, enrolled_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                enrollment_id, student_id, session_id, total_amount,
                paid_amount, enrolled_at, created_at, updated_at
            "#,
        )
        .bind(enrollment.id.as_uuid())
        .bind(enrollment.student_id.as_uuid())
        .bind(enrollment.session_id.as_uuid())
        .bind(enrollment.total_amount.amount())
        .bind(enrollment.paid_amount.amount())
        .bind(enrollment.enrolled_at)
        .bind(enrollment.created_at)
        .bind(enrollment.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves an enrollment by identifier
    ///
    /// # Arguments
    ///
    /// * `enrollment_id` - The enrollment identifier
    ///
    /// # Returns
    ///
    /// The enrollment row or a NotFound error
    pub async fn get_by_id(&self, enrollment_id: Uuid) -> Result<EnrollmentRow, DatabaseError> {
        let enrollment = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT
                enrollment_id, student_id, session_id, total_amount,
                paid_amount, enrolled_at, created_at, updated_at
            FROM enrollments
            WHERE enrollment_id = $1
            "#,
        )
        .bind(enrollment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Enrollment", enrollment_id))?;

        Ok(enrollment)
    }

    /// Lists all enrollments, newest first
    pub async fn list(&self) -> Result<Vec<EnrollmentRow>, DatabaseError> {
        let enrollments = sqlx::query_as::<_, EnrollmentRow>(
            r#"
            SELECT
                enrollment_id, student_id, session_id, total_amount,
                paid_amount, enrolled_at, created_at, updated_at
            FROM enrollments
            ORDER BY enrolled_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(enrollments)
    }
}

// ============================================================================
// Row types
// ============================================================================

/// Database row representation of an enrollment
#[derive(Debug, Clone, FromRow)]
pub struct EnrollmentRow {
    pub enrollment_id: Uuid,
    pub student_id: Uuid,
    pub session_id: Uuid,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub enrolled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for Enrollment {
    fn from(row: EnrollmentRow) -> Self {
        Enrollment {
            id: EnrollmentId::from(row.enrollment_id),
            student_id: StudentId::from(row.student_id),
            session_id: SessionId::from(row.session_id),
            total_amount: Money::new(row.total_amount),
            paid_amount: Money::new(row.paid_amount),
            enrolled_at: row.enrolled_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
