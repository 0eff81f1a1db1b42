//! Payment recording
//!
//! Payments are always attached to an invoice. Whether a payment fits is
//! decided by [`check_payment_fits`] against the invoice amount and the sum
//! of the payments already recorded; individual payments carry no state
//! machine of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{InvoiceId, Money, PaymentId};

use crate::error::BillingError;

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Bank transfer
    BankTransfer,
    /// Credit or debit card
    Card,
    /// Cash
    Cash,
    /// Check/cheque
    Check,
}

/// A payment recorded against an invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub invoice_id: InvoiceId,
    /// Paid amount, strictly positive
    pub amount: Money,
    pub method: PaymentMethod,
    /// External reference (bank ref, receipt number)
    pub reference: Option<String>,
    /// When the money actually changed hands
    pub paid_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    /// Creates a new payment dated now
    ///
    /// # Arguments
    /// * `invoice_id` - Invoice being paid
    /// * `amount` - Payment amount, must be strictly positive
    /// * `method` - How the payment was made
    pub fn new(
        invoice_id: InvoiceId,
        amount: Money,
        method: PaymentMethod,
    ) -> Result<Self, BillingError> {
        if !amount.is_positive() {
            return Err(BillingError::NonPositiveAmount(amount.amount()));
        }

        let now = Utc::now();
        Ok(Self {
            id: PaymentId::new_v7(),
            invoice_id,
            amount,
            method,
            reference: None,
            paid_at: now,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Backdates the payment
    pub fn with_paid_at(mut self, paid_at: DateTime<Utc>) -> Self {
        self.paid_at = paid_at;
        self
    }
}

/// Fields of a payment that may be changed after recording
///
/// Unset fields keep their stored value. Changing the amount re-runs the
/// full reconciliation against the invoice and enrollment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaymentAmendment {
    pub amount: Option<Money>,
    pub method: Option<PaymentMethod>,
    pub reference: Option<String>,
}

impl PaymentAmendment {
    /// Whether the amendment changes anything at all
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.method.is_none() && self.reference.is_none()
    }
}

/// Checks that a candidate payment fits within an invoice's remaining balance
///
/// # Arguments
/// * `invoice_amount` - Total amount of the invoice
/// * `already_paid` - Sum of the payments counted against the invoice,
///   excluding the candidate itself
/// * `candidate` - Amount about to be recorded
///
/// # Returns
/// `Ok(())` when the payment can be recorded. Exactly settling the invoice
/// is allowed; paying a single cent past it is not.
pub fn check_payment_fits(
    invoice_amount: Money,
    already_paid: Money,
    candidate: Money,
) -> Result<(), BillingError> {
    if !candidate.is_positive() {
        return Err(BillingError::NonPositiveAmount(candidate.amount()));
    }

    let remaining = invoice_amount.saturating_sub(&already_paid);
    if candidate > remaining {
        return Err(BillingError::ExceedsRemainingBalance {
            attempted: candidate.amount(),
            remaining: remaining.amount(),
        });
    }

    Ok(())
}
