//! Pre-built Test Fixtures
//!
//! Provides ready-to-use test data for common entities across the training
//! center system. These fixtures are designed to be consistent and
//! predictable for unit tests.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use core_kernel::{
    EnrollmentId, InvoiceId, Money, PaymentId, SessionId, StudentId,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard catalog price of a session
    pub fn session_price() -> Money {
        Money::new(dec!(1200.00))
    }

    /// Standard invoice amount
    pub fn invoice_amount() -> Money {
        Money::new(dec!(500.00))
    }

    /// A round hundred for payment tests
    pub fn hundred() -> Money {
        Money::new(dec!(100.00))
    }

    /// A zero amount
    pub fn zero() -> Money {
        Money::zero()
    }
}

/// Fixture for temporal test data
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Standard session start date (Sep 1, 2025)
    pub fn session_start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
    }

    /// Standard session end date (Dec 19, 2025)
    pub fn session_end() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 19).unwrap()
    }

    /// Standard invoice due date (Oct 15, 2025)
    pub fn due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 10, 15).unwrap()
    }

    /// A due date safely in the past, for overdue tests
    pub fn past_due_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()
    }

    /// Standard payment timestamp
    pub fn paid_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 14, 30, 0).unwrap()
    }

    /// Standard grading timestamp
    pub fn graded_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 11, 20, 9, 0, 0).unwrap()
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    /// Creates a deterministic student ID for testing
    pub fn student_id() -> StudentId {
        StudentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440001").unwrap())
    }

    /// Creates a deterministic session ID for testing
    pub fn session_id() -> SessionId {
        SessionId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440002").unwrap())
    }

    /// Creates a deterministic enrollment ID for testing
    pub fn enrollment_id() -> EnrollmentId {
        EnrollmentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440003").unwrap())
    }

    /// Creates a deterministic invoice ID for testing
    pub fn invoice_id() -> InvoiceId {
        InvoiceId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440004").unwrap())
    }

    /// Creates a deterministic payment ID for testing
    pub fn payment_id() -> PaymentId {
        PaymentId::from_uuid(Uuid::parse_str("550e8400-e29b-41d4-a716-446655440005").unwrap())
    }
}

/// Fixture for decimal test data
pub struct DecimalFixtures;

impl DecimalFixtures {
    /// Full marks on the 20-point scale
    pub fn full_scale() -> Decimal {
        dec!(20)
    }

    /// A comfortable passing grade value
    pub fn passing_value() -> Decimal {
        dec!(14.50)
    }

    /// Default grade weight
    pub fn unit_weight() -> Decimal {
        dec!(1)
    }

    /// A doubled grade weight for exam subjects
    pub fn double_weight() -> Decimal {
        dec!(2)
    }

    /// Zero for comparison tests
    pub fn zero() -> Decimal {
        Decimal::ZERO
    }
}

/// Fixture for string test data
pub struct StringFixtures;

impl StringFixtures {
    /// Standard session code
    pub fn session_code() -> &'static str {
        "RUST-2025-09"
    }

    /// Standard session title
    pub fn session_title() -> &'static str {
        "Systems Programming in Rust"
    }

    /// Standard invoice number
    pub fn invoice_number() -> &'static str {
        "INV-2025-000001"
    }

    /// Standard payment reference
    pub fn payment_reference() -> &'static str {
        "TRX-99012345"
    }

    /// Standard grade subject
    pub fn subject() -> &'static str {
        "Ownership & Borrowing"
    }

    /// Test email address
    pub fn email() -> &'static str {
        "marie.dupont@example.com"
    }

    /// Test phone number
    pub fn phone() -> &'static str {
        "+33-6-12-34-56-78"
    }

    /// Test first name
    pub fn first_name() -> &'static str {
        "Marie"
    }

    /// Test last name
    pub fn last_name() -> &'static str {
        "Dupont"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_fixtures_are_positive() {
        assert!(MoneyFixtures::session_price().is_positive());
        assert!(MoneyFixtures::invoice_amount().is_positive());
        assert!(MoneyFixtures::zero().is_zero());
    }

    #[test]
    fn test_temporal_fixtures_ordering() {
        assert!(TemporalFixtures::session_start() < TemporalFixtures::session_end());
        assert!(TemporalFixtures::due_date() > TemporalFixtures::session_start());
    }

    #[test]
    fn test_id_fixtures_are_deterministic() {
        let id1 = IdFixtures::enrollment_id();
        let id2 = IdFixtures::enrollment_id();
        assert_eq!(id1, id2);
    }
}
