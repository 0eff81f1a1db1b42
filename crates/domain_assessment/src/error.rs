//! Error types for the assessment domain

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when recording grades
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// The grading scale must be strictly positive
    #[error("Maximum value must be positive: {0}")]
    NonPositiveMaxValue(Decimal),

    /// A grade value below zero
    #[error("Grade value cannot be negative: {0}")]
    NegativeValue(Decimal),

    /// A weight below zero
    #[error("Grade weight cannot be negative: {0}")]
    NegativeWeight(Decimal),
}
