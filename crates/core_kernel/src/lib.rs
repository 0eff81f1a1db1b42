//! Core Kernel - Foundational types and utilities for the training center system
//!
//! This crate provides the fundamental building blocks used across all domain modules:
//! - Money type with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - Common error types

pub mod money;
pub mod identifiers;
pub mod error;

pub use money::{Money, MoneyError};
pub use identifiers::{
    StudentId, SessionId, EnrollmentId, InvoiceId, PaymentId, GradeId,
};
pub use error::CoreError;
