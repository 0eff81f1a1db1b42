//! Test Data Builders
//!
//! Provides builder patterns for constructing domain entities with sensible
//! defaults. These builders allow tests to specify only the relevant fields
//! while using defaults for everything else.

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::{EnrollmentId, InvoiceId, Money, SessionId, StudentId};
use domain_assessment::Grade;
use domain_billing::{Invoice, Payment, PaymentMethod};
use domain_enrollment::{Enrollment, Session, Student};
use rust_decimal::Decimal;

use crate::fixtures::{DecimalFixtures, MoneyFixtures, StringFixtures, TemporalFixtures};
use crate::generators::{unique_email, unique_session_code};

/// Builder for constructing test students
///
/// Emails default to a unique value so several students can coexist
/// under the unique constraint within one test database.
pub struct TestStudentBuilder {
    first_name: String,
    last_name: String,
    email: String,
    phone: Option<String>,
}

impl Default for TestStudentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestStudentBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            first_name: StringFixtures::first_name().to_string(),
            last_name: StringFixtures::last_name().to_string(),
            email: unique_email(),
            phone: None,
        }
    }

    /// Sets the first name
    pub fn with_first_name(mut self, name: impl Into<String>) -> Self {
        self.first_name = name.into();
        self
    }

    /// Sets the last name
    pub fn with_last_name(mut self, name: impl Into<String>) -> Self {
        self.last_name = name.into();
        self
    }

    /// Sets the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Sets the phone
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Builds the student entity
    pub fn build(self) -> Student {
        let mut student = Student::new(self.first_name, self.last_name, self.email);
        if let Some(phone) = self.phone {
            student = student.with_phone(phone);
        }
        student
    }
}

/// Builder for constructing test sessions
pub struct TestSessionBuilder {
    code: String,
    title: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    price: Money,
}

impl Default for TestSessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSessionBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            code: unique_session_code(),
            title: StringFixtures::session_title().to_string(),
            start_date: TemporalFixtures::session_start(),
            end_date: TemporalFixtures::session_end(),
            price: MoneyFixtures::session_price(),
        }
    }

    /// Sets the session code
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Sets the session title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the start and end dates
    pub fn with_dates(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Sets the catalog price
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    /// Builds the session entity
    pub fn build(self) -> Session {
        Session::new(
            self.code,
            self.title,
            self.start_date,
            self.end_date,
            self.price,
        )
        .expect("valid session data")
    }
}

/// Builder for constructing test enrollments
pub struct TestEnrollmentBuilder {
    student_id: StudentId,
    session_id: SessionId,
    total_amount: Money,
}

impl Default for TestEnrollmentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnrollmentBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            student_id: StudentId::new(),
            session_id: SessionId::new(),
            total_amount: MoneyFixtures::session_price(),
        }
    }

    /// Sets the student ID
    pub fn with_student_id(mut self, id: StudentId) -> Self {
        self.student_id = id;
        self
    }

    /// Sets the session ID
    pub fn with_session_id(mut self, id: SessionId) -> Self {
        self.session_id = id;
        self
    }

    /// Sets the total amount
    pub fn with_total_amount(mut self, total: Money) -> Self {
        self.total_amount = total;
        self
    }

    /// Builds the enrollment entity
    pub fn build(self) -> Enrollment {
        Enrollment::new(self.student_id, self.session_id, self.total_amount)
            .expect("valid enrollment data")
    }
}

/// Builder for constructing test invoices
pub struct TestInvoiceBuilder {
    enrollment_id: EnrollmentId,
    amount: Money,
    due_date: NaiveDate,
    invoice_number: Option<String>,
}

impl Default for TestInvoiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestInvoiceBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            enrollment_id: EnrollmentId::new(),
            amount: MoneyFixtures::invoice_amount(),
            due_date: TemporalFixtures::due_date(),
            invoice_number: None,
        }
    }

    /// Sets the enrollment ID
    pub fn with_enrollment_id(mut self, id: EnrollmentId) -> Self {
        self.enrollment_id = id;
        self
    }

    /// Sets the invoice amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    /// Sets an explicit invoice number
    pub fn with_invoice_number(mut self, number: impl Into<String>) -> Self {
        self.invoice_number = Some(number.into());
        self
    }

    /// Builds the invoice entity
    pub fn build(self) -> Invoice {
        let invoice = Invoice::new(self.enrollment_id, self.amount, self.due_date)
            .expect("valid invoice data");
        match self.invoice_number {
            Some(number) => invoice.with_invoice_number(number),
            None => invoice,
        }
    }
}

/// Builder for constructing test payments
pub struct TestPaymentBuilder {
    invoice_id: InvoiceId,
    amount: Money,
    method: PaymentMethod,
    reference: Option<String>,
    paid_at: Option<DateTime<Utc>>,
}

impl Default for TestPaymentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPaymentBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            invoice_id: InvoiceId::new(),
            amount: MoneyFixtures::hundred(),
            method: PaymentMethod::BankTransfer,
            reference: None,
            paid_at: None,
        }
    }

    /// Sets the invoice ID
    pub fn with_invoice_id(mut self, id: InvoiceId) -> Self {
        self.invoice_id = id;
        self
    }

    /// Sets the payment amount
    pub fn with_amount(mut self, amount: Money) -> Self {
        self.amount = amount;
        self
    }

    /// Sets the payment method
    pub fn with_method(mut self, method: PaymentMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the external reference
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the payment timestamp
    pub fn with_paid_at(mut self, paid_at: DateTime<Utc>) -> Self {
        self.paid_at = Some(paid_at);
        self
    }

    /// Builds the payment entity
    pub fn build(self) -> Payment {
        let mut payment = Payment::new(self.invoice_id, self.amount, self.method)
            .expect("valid payment data");
        if let Some(reference) = self.reference {
            payment = payment.with_reference(reference);
        }
        if let Some(paid_at) = self.paid_at {
            payment = payment.with_paid_at(paid_at);
        }
        payment
    }
}

/// Builder for constructing test grades
pub struct TestGradeBuilder {
    enrollment_id: EnrollmentId,
    subject: String,
    value: Decimal,
    max_value: Decimal,
    weight: Decimal,
    graded_at: Option<DateTime<Utc>>,
}

impl Default for TestGradeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestGradeBuilder {
    /// Creates a new builder with default values
    pub fn new() -> Self {
        Self {
            enrollment_id: EnrollmentId::new(),
            subject: StringFixtures::subject().to_string(),
            value: DecimalFixtures::passing_value(),
            max_value: DecimalFixtures::full_scale(),
            weight: DecimalFixtures::unit_weight(),
            graded_at: None,
        }
    }

    /// Sets the enrollment ID
    pub fn with_enrollment_id(mut self, id: EnrollmentId) -> Self {
        self.enrollment_id = id;
        self
    }

    /// Sets the subject
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = subject.into();
        self
    }

    /// Sets the raw value
    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = value;
        self
    }

    /// Sets the maximum value of the grading scale
    pub fn with_max_value(mut self, max_value: Decimal) -> Self {
        self.max_value = max_value;
        self
    }

    /// Sets the weight
    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the grading timestamp
    pub fn with_graded_at(mut self, graded_at: DateTime<Utc>) -> Self {
        self.graded_at = Some(graded_at);
        self
    }

    /// Builds the grade entity
    pub fn build(self) -> Grade {
        let grade = Grade::new(
            self.enrollment_id,
            self.subject,
            self.value,
            self.max_value,
            self.weight,
        )
        .expect("valid grade data");
        match self.graded_at {
            Some(graded_at) => grade.with_graded_at(graded_at),
            None => grade,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_student_builder_defaults() {
        let student = TestStudentBuilder::new().build();
        assert_eq!(student.first_name, StringFixtures::first_name());
        assert!(student.email.contains('@'));
        assert!(student.phone.is_none());
    }

    #[test]
    fn test_student_builder_emails_are_unique() {
        let a = TestStudentBuilder::new().build();
        let b = TestStudentBuilder::new().build();
        assert_ne!(a.email, b.email);
    }

    #[test]
    fn test_session_builder_customization() {
        let session = TestSessionBuilder::new()
            .with_code("RUST-ADV-01")
            .with_price(Money::new(dec!(2500.00)))
            .build();

        assert_eq!(session.code, "RUST-ADV-01");
        assert_eq!(session.price.amount(), dec!(2500.00));
    }

    #[test]
    fn test_enrollment_builder_links_ids() {
        let student_id = StudentId::new();
        let enrollment = TestEnrollmentBuilder::new()
            .with_student_id(student_id)
            .build();

        assert_eq!(enrollment.student_id, student_id);
        assert!(enrollment.paid_amount.is_zero());
    }

    #[test]
    fn test_payment_builder_defaults_to_bank_transfer() {
        let payment = TestPaymentBuilder::new().build();
        assert_eq!(payment.method, PaymentMethod::BankTransfer);
        assert!(payment.amount.is_positive());
    }

    #[test]
    fn test_grade_builder_customization() {
        let grade = TestGradeBuilder::new()
            .with_value(dec!(9))
            .with_max_value(dec!(10))
            .with_weight(dec!(2))
            .build();

        assert_eq!(grade.normalized_on_20(), dec!(18));
    }
}
