//! Error types for the enrollment domain

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by enrollment domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EnrollmentError {
    /// Session end date falls before its start date
    #[error("Session end date {end} precedes start date {start}")]
    SessionDatesOutOfOrder { start: NaiveDate, end: NaiveDate },

    /// An amount that must not be negative was negative
    #[error("Amount cannot be negative: {0}")]
    NegativeAmount(Decimal),

    /// An amount that must be strictly positive was zero or negative
    #[error("Amount must be positive: {0}")]
    NonPositiveAmount(Decimal),

    /// A payment reversal would drive the paid total below zero
    #[error("Cannot reverse {amount}: only {paid} has been paid")]
    ReversalExceedsPaid { amount: Decimal, paid: Decimal },
}
