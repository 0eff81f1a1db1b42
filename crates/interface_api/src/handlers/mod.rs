//! HTTP request handlers

pub mod enrollments;
pub mod grades;
pub mod health;
pub mod invoices;
pub mod payments;
pub mod sessions;
pub mod students;
