//! Test Data Generators
//!
//! Provides proptest strategies for generating random test data that
//! maintains domain invariants, plus fake-based helpers for unique
//! values where the schema enforces uniqueness.

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{EnrollmentId, Money};
use domain_assessment::Grade;
use domain_billing::PaymentMethod;
use fake::faker::internet::en::Username;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

// ============================================================================
// Proptest strategies
// ============================================================================

/// Strategy for generating positive amounts in cents
pub fn positive_amount_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    positive_amount_minor_strategy().prop_map(Money::from_minor)
}

/// Strategy for generating small positive Money values (up to 1000.00)
pub fn small_money_strategy() -> impl Strategy<Value = Money> {
    (1i64..100_000i64).prop_map(Money::from_minor)
}

/// Strategy for generating payment methods
pub fn payment_method_strategy() -> impl Strategy<Value = PaymentMethod> {
    prop_oneof![
        Just(PaymentMethod::BankTransfer),
        Just(PaymentMethod::Card),
        Just(PaymentMethod::Cash),
        Just(PaymentMethod::Check),
    ]
}

/// Strategy for generating grade values on the 20-point scale
pub fn grade_value_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=2000i64).prop_map(|n| Decimal::new(n, 2))
}

/// Strategy for generating non-negative grade weights (0.0 to 5.0)
pub fn weight_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=50i64).prop_map(|n| Decimal::new(n, 1))
}

/// Strategy for generating grade subjects
pub fn subject_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{3,12}"
}

/// Strategy for generating valid grades out of 20 for one enrollment
pub fn grade_strategy(enrollment_id: EnrollmentId) -> impl Strategy<Value = Grade> {
    (subject_strategy(), grade_value_strategy(), weight_strategy()).prop_map(
        move |(subject, value, weight)| {
            Grade::new(enrollment_id, subject, value, dec!(20), weight)
                .expect("generated grade within bounds")
        },
    )
}

/// Strategy for generating payment timestamps within 2025
pub fn paid_at_strategy() -> impl Strategy<Value = chrono::DateTime<Utc>> {
    (0i64..365i64).prop_map(|days| {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap() + Duration::days(days)
    })
}

// ============================================================================
// Fake-based helpers
// ============================================================================

/// Generates a unique email address
///
/// The random suffix keeps concurrent tests from tripping the unique
/// constraint on `students.email`.
pub fn unique_email() -> String {
    let local: String = Username().fake();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}.{}@example.net", local, &suffix[..8])
}

/// Generates a unique session code
pub fn unique_session_code() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("TRN-{}", suffix[..8].to_uppercase())
}

/// Generates a unique invoice number
pub fn unique_invoice_number() -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("INV-{}", suffix[..10].to_uppercase())
}

/// Generates a realistic first name
pub fn fake_first_name() -> String {
    FirstName().fake()
}

/// Generates a realistic last name
pub fn fake_last_name() -> String {
    LastName().fake()
}

/// Generates a realistic phone number
pub fn fake_phone() -> String {
    PhoneNumber().fake()
}
