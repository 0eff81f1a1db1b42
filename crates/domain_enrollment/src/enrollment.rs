//! Enrollment aggregate
//!
//! Binds one student to one training session and tracks the money side of
//! that relationship. `paid_amount` is a denormalized running total kept in
//! step with the payments recorded against the enrollment's invoices; every
//! payment mutation goes through [`Enrollment::apply_payment`] or
//! [`Enrollment::reverse_payment`] so the total can never drift negative.

use chrono::{DateTime, Utc};
use core_kernel::{EnrollmentId, Money, SessionId, StudentId};
use serde::{Deserialize, Serialize};

use crate::error::EnrollmentError;

/// One student's participation in one session, with its financial summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub student_id: StudentId,
    pub session_id: SessionId,
    /// Agreed price for this enrollment
    pub total_amount: Money,
    /// Sum of payments recorded against this enrollment's invoices
    pub paid_amount: Money,
    pub enrolled_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Enrollment {
    /// Creates a new enrollment with nothing paid yet
    ///
    /// # Arguments
    /// * `student_id` - The enrolling student
    /// * `session_id` - The session being enrolled in
    /// * `total_amount` - Agreed price, must not be negative
    pub fn new(
        student_id: StudentId,
        session_id: SessionId,
        total_amount: Money,
    ) -> Result<Self, EnrollmentError> {
        if total_amount.is_negative() {
            return Err(EnrollmentError::NegativeAmount(total_amount.amount()));
        }

        let now = Utc::now();
        Ok(Self {
            id: EnrollmentId::new_v7(),
            student_id,
            session_id,
            total_amount,
            paid_amount: Money::zero(),
            enrolled_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    /// Amount still owed, floored at zero when the enrollment is overpaid
    pub fn outstanding_balance(&self) -> Money {
        self.total_amount.saturating_sub(&self.paid_amount)
    }

    /// Whether the full price has been covered
    pub fn is_settled(&self) -> bool {
        self.paid_amount >= self.total_amount
    }

    /// Registers a payment against this enrollment
    ///
    /// The amount must be strictly positive. Invoice-level guards decide
    /// whether a payment fits; this mutator only keeps the running total
    /// coherent.
    pub fn apply_payment(&mut self, amount: Money) -> Result<(), EnrollmentError> {
        if !amount.is_positive() {
            return Err(EnrollmentError::NonPositiveAmount(amount.amount()));
        }
        self.paid_amount = self.paid_amount + amount;
        self.touch();
        Ok(())
    }

    /// Backs out a previously registered payment
    ///
    /// # Returns
    /// An error when the amount is not positive or exceeds what has been
    /// paid so far.
    pub fn reverse_payment(&mut self, amount: Money) -> Result<(), EnrollmentError> {
        if !amount.is_positive() {
            return Err(EnrollmentError::NonPositiveAmount(amount.amount()));
        }
        if amount > self.paid_amount {
            return Err(EnrollmentError::ReversalExceedsPaid {
                amount: amount.amount(),
                paid: self.paid_amount.amount(),
            });
        }
        self.paid_amount = self.paid_amount - amount;
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
