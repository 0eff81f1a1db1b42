//! # Assessment Domain
//!
//! Grades recorded against enrollments and their weighted average.
//!
//! Grades can be given on any scale; [`weighted_average`] normalizes each
//! one onto the 20-point scale before weighting, so a 45/50 quiz and a
//! 12/20 exam combine the way a grader would expect. An enrollment with no
//! grades (or only zero-weight grades) has no average rather than a zero.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::EnrollmentId;
//! use domain_assessment::{weighted_average, Grade};
//! use rust_decimal_macros::dec;
//!
//! let enrollment_id = EnrollmentId::new();
//! let grades = vec![
//!     Grade::new(enrollment_id, "Theory", dec!(12), dec!(20), dec!(2)).unwrap(),
//!     Grade::new(enrollment_id, "Lab", dec!(9), dec!(10), dec!(1)).unwrap(),
//! ];
//!
//! assert_eq!(weighted_average(&grades), Some(dec!(14.00)));
//! ```

pub mod average;
pub mod error;
pub mod grade;

pub use average::weighted_average;
pub use error::AssessmentError;
pub use grade::{Grade, GRADE_SCALE};
