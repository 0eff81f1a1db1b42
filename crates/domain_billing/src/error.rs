//! Billing domain errors

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur in the billing domain
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// An amount that must be strictly positive was zero or negative
    #[error("Amount must be positive: {0}")]
    NonPositiveAmount(Decimal),

    /// A payment would push the invoice's paid total past its amount
    #[error("Payment of {attempted} exceeds remaining balance of {remaining}")]
    ExceedsRemainingBalance {
        attempted: Decimal,
        remaining: Decimal,
    },
}
