//! Enrollment DTOs

use chrono::{DateTime, Utc};
use core_kernel::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use infra_db::repositories::enrollments::EnrollmentRow;

#[derive(Debug, Deserialize)]
pub struct CreateEnrollmentRequest {
    pub student_id: Uuid,
    pub session_id: Uuid,
    /// Defaults to the session's catalog price when omitted
    pub total_amount: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct EnrollmentResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub session_id: Uuid,
    pub total_amount: Decimal,
    pub paid_amount: Decimal,
    pub outstanding_balance: Decimal,
    pub enrolled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<EnrollmentRow> for EnrollmentResponse {
    fn from(row: EnrollmentRow) -> Self {
        let outstanding = Money::new(row.total_amount)
            .saturating_sub(&Money::new(row.paid_amount))
            .amount();

        Self {
            id: row.enrollment_id,
            student_id: row.student_id,
            session_id: row.session_id,
            total_amount: row.total_amount,
            paid_amount: row.paid_amount,
            outstanding_balance: outstanding,
            enrolled_at: row.enrolled_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
