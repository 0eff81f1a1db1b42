//! # Billing Domain
//!
//! Invoices and payments for training enrollments, with the reconciliation
//! rules that keep the three financial views in step:
//!
//! - a payment never exceeds its invoice's remaining balance
//!   ([`check_payment_fits`])
//! - an invoice's status is a pure function of its amount and the payments
//!   recorded against it ([`derive_status`])
//! - the enrollment's paid total moves by exactly the amount of every
//!   payment recorded, amended, or deleted
//!
//! The functions here are pure; making them hold atomically against
//! concurrent writers is the persistence layer's job.
//!
//! # Example
//!
//! ```rust
//! use core_kernel::Money;
//! use domain_billing::{check_payment_fits, derive_status, InvoiceStatus};
//! use rust_decimal_macros::dec;
//!
//! let amount = Money::new(dec!(600.00));
//! let paid = Money::new(dec!(200.00));
//!
//! assert_eq!(derive_status(paid, amount), InvoiceStatus::PartiallyPaid);
//! assert!(check_payment_fits(amount, paid, Money::new(dec!(400.00))).is_ok());
//! assert!(check_payment_fits(amount, paid, Money::new(dec!(400.01))).is_err());
//! ```

pub mod error;
pub mod invoice;
pub mod payment;

pub use error::BillingError;
pub use invoice::{derive_status, Invoice, InvoiceStatus};
pub use payment::{check_payment_fits, Payment, PaymentAmendment, PaymentMethod};
