//! Invoice management
//!
//! Invoices bill an enrollment for part or all of its price. An invoice's
//! status is never edited directly: it is derived from the invoice amount and
//! the sum of the payments recorded against it, and recomputed after every
//! payment mutation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{EnrollmentId, InvoiceId, Money};

use crate::error::BillingError;

/// Invoice settlement state, derived from the recorded payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// No payment recorded yet
    Unpaid,
    /// Some payment recorded, but less than the invoice amount
    PartiallyPaid,
    /// Payments cover the full invoice amount
    Paid,
}

/// Computes the status an invoice must carry for a given paid total
///
/// The zero check comes first so that the paid threshold only applies once
/// at least one payment exists.
pub fn derive_status(paid: Money, amount: Money) -> InvoiceStatus {
    if paid.is_zero() {
        InvoiceStatus::Unpaid
    } else if paid >= amount {
        InvoiceStatus::Paid
    } else {
        InvoiceStatus::PartiallyPaid
    }
}

/// An invoice issued against an enrollment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Human-readable number, unique across all invoices
    pub invoice_number: String,
    pub enrollment_id: EnrollmentId,
    /// Billed amount, strictly positive
    pub amount: Money,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Creates a new unpaid invoice
    ///
    /// # Arguments
    /// * `enrollment_id` - Enrollment being billed
    /// * `amount` - Billed amount, must be strictly positive
    /// * `due_date` - Payment due date
    ///
    /// # Returns
    /// The invoice with a generated number, or an error when the amount is
    /// not positive.
    pub fn new(
        enrollment_id: EnrollmentId,
        amount: Money,
        due_date: NaiveDate,
    ) -> Result<Self, BillingError> {
        if !amount.is_positive() {
            return Err(BillingError::NonPositiveAmount(amount.amount()));
        }

        let now = Utc::now();
        Ok(Self {
            id: InvoiceId::new_v7(),
            invoice_number: generate_invoice_number(),
            enrollment_id,
            amount,
            status: InvoiceStatus::Unpaid,
            due_date,
            created_at: now,
            updated_at: now,
        })
    }

    /// Overrides the generated invoice number
    pub fn with_invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = number.into();
        self
    }

    /// Amount still payable given the current paid total, floored at zero
    pub fn remaining_balance(&self, paid: Money) -> Money {
        self.amount.saturating_sub(&paid)
    }

    /// Recomputes the status from the given paid total
    pub fn refresh_status(&mut self, paid: Money) {
        self.status = derive_status(paid, self.amount);
        self.updated_at = Utc::now();
    }

    /// Whether the due date has passed without the invoice being settled
    pub fn is_overdue(&self) -> bool {
        let today = Utc::now().date_naive();
        today > self.due_date && self.status != InvoiceStatus::Paid
    }
}

/// Generates a unique invoice number
fn generate_invoice_number() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let duration = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("INV-{}", duration.as_micros() % 1_000_000_000_000)
}
