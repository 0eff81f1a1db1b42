//! Kernel-level error types shared by the domain crates

use crate::money::MoneyError;
use thiserror::Error;

/// Errors produced by the kernel's own types.
///
/// Domain crates define richer error enums of their own; this one covers
/// the failures that can occur before a value ever reaches a domain type.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    #[error("Malformed identifier {input:?}: expected a UUID, optionally prefixed {expected_prefix}-")]
    MalformedIdentifier {
        expected_prefix: &'static str,
        input: String,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }

    pub fn malformed_identifier(expected_prefix: &'static str, input: impl Into<String>) -> Self {
        CoreError::MalformedIdentifier {
            expected_prefix,
            input: input.into(),
        }
    }
}
