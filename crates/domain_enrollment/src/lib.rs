//! # Enrollment Domain
//!
//! Students, training sessions, and the enrollment that binds them together.
//!
//! An [`Enrollment`] carries the financial summary of one student attending one
//! session: the agreed `total_amount` and the running `paid_amount` maintained
//! as payments are recorded against the enrollment's invoices. The outstanding
//! balance is always derived from those two figures, never stored.
//!
//! ## Example
//!
//! ```rust
//! use core_kernel::{Money, StudentId, SessionId};
//! use domain_enrollment::Enrollment;
//! use rust_decimal_macros::dec;
//!
//! let enrollment = Enrollment::new(
//!     StudentId::new(),
//!     SessionId::new(),
//!     Money::new(dec!(1500.00)),
//! ).unwrap();
//!
//! assert_eq!(enrollment.outstanding_balance(), Money::new(dec!(1500.00)));
//! ```

pub mod enrollment;
pub mod error;
pub mod session;
pub mod student;

pub use enrollment::Enrollment;
pub use error::EnrollmentError;
pub use session::Session;
pub use student::Student;
