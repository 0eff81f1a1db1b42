//! Cross-Domain Workflow Tests
//!
//! These tests verify multi-entity scenarios that span the enrollment,
//! billing, and assessment crates, composed from the shared builders.

use core_kernel::Money;
use rust_decimal_macros::dec;

mod enrollment_billing_workflow {
    use super::*;
    use domain_billing::{check_payment_fits, derive_status, BillingError, InvoiceStatus};
    use domain_enrollment::EnrollmentError;
    use test_utils::{
        assert_err_variant, assert_money_approx_eq, assert_ok, TestEnrollmentBuilder,
        TestInvoiceBuilder, TestPaymentBuilder, TestSessionBuilder,
    };

    /// Tests that an enrollment settles through staged invoice payments
    #[test]
    fn test_enrollment_settles_through_staged_payments() {
        let session = TestSessionBuilder::new()
            .with_price(Money::new(dec!(1200.00)))
            .build();

        let mut enrollment = TestEnrollmentBuilder::new()
            .with_session_id(session.id)
            .with_total_amount(session.price)
            .build();

        let invoice = TestInvoiceBuilder::new()
            .with_enrollment_id(enrollment.id)
            .with_amount(Money::new(dec!(1200.00)))
            .build();

        // First installment covers part of the invoice
        let first = TestPaymentBuilder::new()
            .with_invoice_id(invoice.id)
            .with_amount(Money::new(dec!(700.00)))
            .build();

        enrollment
            .apply_payment(first.amount)
            .expect("Failed to apply first installment");

        assert_eq!(
            derive_status(first.amount, invoice.amount),
            InvoiceStatus::PartiallyPaid
        );
        assert_eq!(enrollment.outstanding_balance(), Money::new(dec!(500.00)));
        assert!(!enrollment.is_settled());

        // Second installment settles the remainder
        let second = TestPaymentBuilder::new()
            .with_invoice_id(invoice.id)
            .with_amount(Money::new(dec!(500.00)))
            .build();

        enrollment
            .apply_payment(second.amount)
            .expect("Failed to apply second installment");

        let paid = first.amount + second.amount;
        assert_eq!(derive_status(paid, invoice.amount), InvoiceStatus::Paid);
        assert!(enrollment.is_settled());
        assert_money_approx_eq(&enrollment.outstanding_balance(), &Money::zero(), dec!(0));
    }

    /// Tests that a payment exceeding the remaining balance is rejected
    /// while an exact fill goes through
    #[test]
    fn test_overpayment_is_rejected_but_exact_fill_fits() {
        let invoice = TestInvoiceBuilder::new()
            .with_amount(Money::new(dec!(500.00)))
            .build();

        let already_paid = Money::new(dec!(300.00));

        assert_err_variant!(
            check_payment_fits(invoice.amount, already_paid, Money::new(dec!(250.00))),
            BillingError::ExceedsRemainingBalance { .. }
        );

        assert_ok!(check_payment_fits(
            invoice.amount,
            already_paid,
            Money::new(dec!(200.00))
        ));
    }

    /// Tests that reversing a payment rewinds the enrollment's paid total
    #[test]
    fn test_payment_reversal_rewinds_enrollment() {
        let mut enrollment = TestEnrollmentBuilder::new()
            .with_total_amount(Money::new(dec!(800.00)))
            .build();

        enrollment
            .apply_payment(Money::new(dec!(200.00)))
            .expect("Failed to apply payment");
        enrollment
            .reverse_payment(Money::new(dec!(200.00)))
            .expect("Failed to reverse payment");

        assert!(enrollment.paid_amount.is_zero());
        assert_eq!(enrollment.outstanding_balance(), Money::new(dec!(800.00)));

        // Nothing left to reverse
        assert_err_variant!(
            enrollment.reverse_payment(Money::new(dec!(50.00))),
            EnrollmentError::ReversalExceedsPaid { .. }
        );
    }
}

mod student_registration_workflow {
    use super::*;
    use domain_enrollment::{EnrollmentError, Session, Student};
    use test_utils::{
        assert_err_variant, fake_first_name, fake_last_name, fake_phone, unique_email,
        TemporalFixtures, TestStudentBuilder,
    };

    /// Tests that generated identities register as distinct students
    #[test]
    fn test_faked_identities_register_distinct_students() {
        let alice = TestStudentBuilder::new()
            .with_first_name(fake_first_name())
            .with_last_name(fake_last_name())
            .with_phone(fake_phone())
            .build();
        let bob = TestStudentBuilder::new().build();

        assert_ne!(alice.email, bob.email);
        assert!(alice.phone.is_some());
        assert!(!alice.full_name().trim().is_empty());
    }

    /// Tests that a session with inverted dates is rejected at construction
    #[test]
    fn test_session_rejects_inverted_dates() {
        let result = Session::new(
            "TRN-BAD-01",
            "Backwards Session",
            TemporalFixtures::session_end(),
            TemporalFixtures::session_start(),
            Money::new(dec!(900.00)),
        );

        assert_err_variant!(result, EnrollmentError::SessionDatesOutOfOrder { .. });
    }

    /// Tests that a student registered with an explicit email keeps it
    #[test]
    fn test_explicit_email_is_preserved() {
        let email = unique_email();
        let student: Student = TestStudentBuilder::new().with_email(email.clone()).build();

        assert_eq!(student.email, email);
    }
}

mod grade_reporting_workflow {
    use super::*;
    use domain_assessment::weighted_average;
    use test_utils::TestGradeBuilder;

    /// Tests the weighted average across differently scaled subjects
    #[test]
    fn test_weighted_average_across_subjects() {
        let theory = TestGradeBuilder::new()
            .with_subject("Theory")
            .with_value(dec!(12))
            .with_max_value(dec!(20))
            .with_weight(dec!(2))
            .build();
        let lab = TestGradeBuilder::new()
            .with_subject("Lab")
            .with_value(dec!(9))
            .with_max_value(dec!(10))
            .with_weight(dec!(1))
            .build();

        // (12 * 2 + 18 * 1) / 3 = 14 on the 20-point scale
        let average = weighted_average(&[theory, lab]);
        assert_eq!(average, Some(dec!(14.00)));
    }

    /// Tests that an all-zero-weight report yields no average
    #[test]
    fn test_zero_weight_grades_produce_no_average() {
        let grades = vec![
            TestGradeBuilder::new().with_weight(dec!(0)).build(),
            TestGradeBuilder::new().with_weight(dec!(0)).build(),
        ];

        assert_eq!(weighted_average(&grades), None);
    }

    /// Tests that a single grade averages to its own normalized value
    #[test]
    fn test_single_grade_average_is_its_normalized_value() {
        let grade = TestGradeBuilder::new()
            .with_value(dec!(15))
            .with_max_value(dec!(20))
            .with_weight(dec!(3))
            .build();

        assert_eq!(weighted_average(&[grade]), Some(dec!(15.00)));
    }
}
