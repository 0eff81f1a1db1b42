//! Request and response data transfer objects
//!
//! Request DTOs carry `validator` derives for shallow field validation;
//! value-level rules (positive amounts, date ordering) live on the
//! domain constructors.

pub mod enrollments;
pub mod grades;
pub mod invoices;
pub mod payments;
pub mod sessions;
pub mod students;
