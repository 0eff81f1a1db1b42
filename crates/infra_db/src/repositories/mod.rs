//! Repository implementations for domain entities
//!
//! This module provides concrete repository implementations that handle
//! database access for each domain aggregate. Repositories encapsulate
//! SQL queries and map between database rows and domain types.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Runtime-checked queries bound to explicit row structs
//! - Transaction support with row-level locking for the payment cascade
//! - Classified errors via `DatabaseError`

pub mod billing;
pub mod enrollments;
pub mod grades;
pub mod sessions;
pub mod students;

pub use billing::{BillingRepository, PaymentError};
pub use enrollments::EnrollmentRepository;
pub use grades::GradeRepository;
pub use sessions::SessionRepository;
pub use students::StudentRepository;
