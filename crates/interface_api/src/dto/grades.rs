//! Grade DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use infra_db::repositories::grades::GradeRow;

#[derive(Debug, Deserialize, Validate)]
pub struct RecordGradeRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub subject: String,
    pub value: Decimal,
    pub max_value: Decimal,
    pub weight: Decimal,
    pub graded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct GradeResponse {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub subject: String,
    pub value: Decimal,
    pub max_value: Decimal,
    pub weight: Decimal,
    pub graded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<GradeRow> for GradeResponse {
    fn from(row: GradeRow) -> Self {
        Self {
            id: row.grade_id,
            enrollment_id: row.enrollment_id,
            subject: row.subject,
            value: row.value,
            max_value: row.max_value,
            weight: row.weight,
            graded_at: row.graded_at,
            created_at: row.created_at,
        }
    }
}

/// Weighted average of an enrollment's grades on the 20-point scale
///
/// `average` is `null` when the enrollment has no grades or all
/// weights are zero.
#[derive(Debug, Serialize)]
pub struct GradeAverageResponse {
    pub enrollment_id: Uuid,
    pub grade_count: usize,
    pub average: Option<Decimal>,
}
