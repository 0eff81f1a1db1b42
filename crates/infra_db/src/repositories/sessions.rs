//! Training session repository implementation

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use domain_enrollment::Session;

use crate::error::DatabaseError;

/// Repository for training session records
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: PgPool,
}

impl SessionRepository {
    /// Creates a new SessionRepository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persists a new session
    ///
    /// # Arguments
    ///
    /// * `session` - The validated session entity
    ///
    /// # Returns
    ///
    /// The stored row. A duplicate code surfaces as
    /// `DatabaseError::DuplicateEntry`.
    pub async fn insert(&self, session: &Session) -> Result<SessionRow, DatabaseError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            INSERT INTO sessions (
                session_id, code, title, start_date, end_date, price,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                session_id, code, title, start_date, end_date, price,
                created_at, updated_at
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(&session.code)
        .bind(&session.title)
        .bind(session.start_date)
        .bind(session.end_date)
        .bind(session.price.amount())
        .bind(session.created_at)
        .bind(session.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves a session by identifier
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session identifier
    ///
    /// # Returns
    ///
    /// The session row or a NotFound error
    pub async fn get_by_id(&self, session_id: Uuid) -> Result<SessionRow, DatabaseError> {
        let session = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id, code, title, start_date, end_date, price,
                created_at, updated_at
            FROM sessions
            WHERE session_id = $1
            "#,
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Session", session_id))?;

        Ok(session)
    }

    /// Lists all sessions, soonest start first
    pub async fn list(&self) -> Result<Vec<SessionRow>, DatabaseError> {
        let sessions = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT
                session_id, code, title, start_date, end_date, price,
                created_at, updated_at
            FROM sessions
            ORDER BY start_date, code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}

// ============================================================================
// Row types
// ============================================================================

/// Database row representation of a training session
#[derive(Debug, Clone, FromRow)]
pub struct SessionRow {
    pub session_id: Uuid,
    pub code: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub price: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
