//! Billing repository implementation
//!
//! This module provides database access for invoices and payments,
//! including the reconciliation cascade that keeps derived financial
//! state consistent: every payment mutation runs in a single transaction
//! that locks the payment row (when one already exists), the invoice
//! row, and then its enrollment row (`SELECT ... FOR UPDATE`, always in
//! that order) before reading the payment sum, so concurrent mutations
//! against the same invoice serialize instead of racing.

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool, Postgres, Transaction};
use uuid::Uuid;

use core_kernel::Money;
use domain_billing::{check_payment_fits, derive_status, BillingError, Invoice, Payment, PaymentAmendment};
use domain_enrollment::{Enrollment, EnrollmentError};

use crate::error::DatabaseError;
use crate::repositories::enrollments::EnrollmentRow;

/// Errors raised by payment mutations
///
/// Payment mutations cross three layers: the overpayment guard and the
/// paid-total bookkeeping are domain rules, everything else is database
/// plumbing. Each source keeps its own error type; this enum carries
/// whichever one stopped the cascade.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error(transparent)]
    Billing(#[from] BillingError),

    #[error(transparent)]
    Enrollment(#[from] EnrollmentError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

impl From<sqlx::Error> for PaymentError {
    fn from(error: sqlx::Error) -> Self {
        PaymentError::Database(DatabaseError::from(error))
    }
}

/// Repository for invoices and their payments
///
/// Invoice status and enrollment paid totals are derived state; they are
/// written exclusively here, inside the payment transactions.
#[derive(Debug, Clone)]
pub struct BillingRepository {
    pool: PgPool,
}

impl BillingRepository {
    /// Creates a new BillingRepository with the given connection pool
    ///
    /// # Arguments
    ///
    /// * `pool` - The PostgreSQL connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ------------------------------------------------------------------
    // Invoices
    // ------------------------------------------------------------------

    /// Persists a new invoice
    ///
    /// # Arguments
    ///
    /// * `invoice` - The validated invoice entity
    pub async fn create_invoice(&self, invoice: &Invoice) -> Result<InvoiceRow, DatabaseError> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            INSERT INTO invoices (
                invoice_id, invoice_number, enrollment_id, amount, status,
                due_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                invoice_id, invoice_number, enrollment_id, amount, status,
                due_date, created_at, updated_at
            "#,
        )
        .bind(invoice.id.as_uuid())
        .bind(&invoice.invoice_number)
        .bind(invoice.enrollment_id.as_uuid())
        .bind(invoice.amount.amount())
        .bind(InvoiceStatus::from(invoice.status))
        .bind(invoice.due_date)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Retrieves an invoice together with its paid total
    ///
    /// # Arguments
    ///
    /// * `invoice_id` - The invoice identifier
    ///
    /// # Returns
    ///
    /// The invoice summary or a NotFound error
    pub async fn get_invoice_summary(
        &self,
        invoice_id: Uuid,
    ) -> Result<InvoiceSummary, DatabaseError> {
        let summary = sqlx::query_as::<_, InvoiceSummary>(
            r#"
            SELECT
                i.invoice_id, i.invoice_number, i.enrollment_id, i.amount,
                i.status, i.due_date,
                COALESCE(SUM(p.amount), 0) AS amount_paid,
                i.created_at, i.updated_at
            FROM invoices i
            LEFT JOIN payments p ON p.invoice_id = i.invoice_id
            WHERE i.invoice_id = $1
            GROUP BY i.invoice_id
            "#,
        )
        .bind(invoice_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Invoice", invoice_id))?;

        Ok(summary)
    }

    /// Lists the invoices of an enrollment with their paid totals
    ///
    /// # Arguments
    ///
    /// * `enrollment_id` - The enrollment identifier
    pub async fn list_invoices_for_enrollment(
        &self,
        enrollment_id: Uuid,
    ) -> Result<Vec<InvoiceSummary>, DatabaseError> {
        let summaries = sqlx::query_as::<_, InvoiceSummary>(
            r#"
            SELECT
                i.invoice_id, i.invoice_number, i.enrollment_id, i.amount,
                i.status, i.due_date,
                COALESCE(SUM(p.amount), 0) AS amount_paid,
                i.created_at, i.updated_at
            FROM invoices i
            LEFT JOIN payments p ON p.invoice_id = i.invoice_id
            WHERE i.enrollment_id = $1
            GROUP BY i.invoice_id
            ORDER BY i.created_at
            "#,
        )
        .bind(enrollment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    // ------------------------------------------------------------------
    // Payments
    // ------------------------------------------------------------------

    /// Retrieves a payment by identifier
    ///
    /// # Arguments
    ///
    /// * `payment_id` - The payment identifier
    pub async fn get_payment(&self, payment_id: Uuid) -> Result<PaymentRow, DatabaseError> {
        let payment = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT
                payment_id, invoice_id, amount, method, reference,
                paid_at, created_at, updated_at
            FROM payments
            WHERE payment_id = $1
            "#,
        )
        .bind(payment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| DatabaseError::not_found("Payment", payment_id))?;

        Ok(payment)
    }

    /// Lists the payments of an invoice in chronological order
    ///
    /// # Arguments
    ///
    /// * `invoice_id` - The invoice identifier
    pub async fn list_payments_for_invoice(
        &self,
        invoice_id: Uuid,
    ) -> Result<Vec<PaymentRow>, DatabaseError> {
        let payments = sqlx::query_as::<_, PaymentRow>(
            r#"
            SELECT
                payment_id, invoice_id, amount, method, reference,
                paid_at, created_at, updated_at
            FROM payments
            WHERE invoice_id = $1
            ORDER BY paid_at, created_at
            "#,
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Records a payment and reconciles the derived state around it
    ///
    /// In one transaction: locks the invoice and its enrollment, checks
    /// the overpayment guard against the current paid total, inserts the
    /// payment, recomputes the invoice status, and increments the
    /// enrollment's paid total by the payment amount.
    ///
    /// # Arguments
    ///
    /// * `payment` - The validated payment entity
    ///
    /// # Returns
    ///
    /// The stored payment row
    ///
    /// # Errors
    ///
    /// `BillingError::ExceedsRemainingBalance` when the payment does not
    /// fit; `DatabaseError::NotFound` when the invoice or enrollment is
    /// missing. Nothing is persisted on error.
    pub async fn record_payment(&self, payment: &Payment) -> Result<PaymentRow, PaymentError> {
        let mut tx = self.pool.begin().await?;

        let invoice_id = *payment.invoice_id.as_uuid();
        let invoice = lock_invoice(&mut tx, invoice_id).await?;
        let enrollment_row = lock_enrollment(&mut tx, invoice.enrollment_id).await?;

        let already_paid = Money::new(payments_total(&mut tx, invoice_id, None).await?);
        check_payment_fits(Money::new(invoice.amount), already_paid, payment.amount)?;

        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            INSERT INTO payments (
                payment_id, invoice_id, amount, method, reference,
                paid_at, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                payment_id, invoice_id, amount, method, reference,
                paid_at, created_at, updated_at
            "#,
        )
        .bind(payment.id.as_uuid())
        .bind(invoice_id)
        .bind(payment.amount.amount())
        .bind(PaymentMethod::from(payment.method))
        .bind(&payment.reference)
        .bind(payment.paid_at)
        .bind(payment.created_at)
        .bind(payment.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        let new_total = already_paid + payment.amount;
        let status = derive_status(new_total, Money::new(invoice.amount));
        persist_invoice_status(&mut tx, invoice_id, InvoiceStatus::from(status)).await?;

        let mut enrollment = Enrollment::from(enrollment_row);
        enrollment.apply_payment(payment.amount)?;
        persist_enrollment_paid(&mut tx, &enrollment).await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Amends a payment, re-running the reconciliation when its amount changes
    ///
    /// The overpayment guard is evaluated against the cumulative total with
    /// the new amount substituted for the old one, so shrinking and growing
    /// a payment are symmetric: the invoice status and the enrollment's
    /// paid total always move by the delta.
    ///
    /// # Arguments
    ///
    /// * `payment_id` - The payment to amend
    /// * `amendment` - Fields to change; unset fields keep their value
    ///
    /// # Returns
    ///
    /// The updated payment row
    pub async fn amend_payment(
        &self,
        payment_id: Uuid,
        amendment: PaymentAmendment,
    ) -> Result<PaymentRow, PaymentError> {
        let mut tx = self.pool.begin().await?;

        let payment = lock_payment(&mut tx, payment_id).await?;
        let invoice = lock_invoice(&mut tx, payment.invoice_id).await?;
        let enrollment_row = lock_enrollment(&mut tx, invoice.enrollment_id).await?;

        let old_amount = Money::new(payment.amount);
        let new_amount = amendment.amount.unwrap_or(old_amount);

        if new_amount != old_amount {
            let others =
                Money::new(payments_total(&mut tx, payment.invoice_id, Some(payment_id)).await?);
            check_payment_fits(Money::new(invoice.amount), others, new_amount)?;

            let new_total = others + new_amount;
            let status = derive_status(new_total, Money::new(invoice.amount));
            persist_invoice_status(&mut tx, payment.invoice_id, InvoiceStatus::from(status))
                .await?;

            let mut enrollment = Enrollment::from(enrollment_row);
            if new_amount > old_amount {
                enrollment.apply_payment(new_amount - old_amount)?;
            } else {
                enrollment.reverse_payment(old_amount - new_amount)?;
            }
            persist_enrollment_paid(&mut tx, &enrollment).await?;
        }

        let row = sqlx::query_as::<_, PaymentRow>(
            r#"
            UPDATE payments
            SET amount = $2,
                method = COALESCE($3, method),
                reference = COALESCE($4, reference),
                updated_at = $5
            WHERE payment_id = $1
            RETURNING
                payment_id, invoice_id, amount, method, reference,
                paid_at, created_at, updated_at
            "#,
        )
        .bind(payment_id)
        .bind(new_amount.amount())
        .bind(amendment.method.map(PaymentMethod::from))
        .bind(amendment.reference)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Voids a payment and reconciles the derived state around it
    ///
    /// In one transaction: locks the payment, its invoice, and its
    /// enrollment, deletes the payment row, recomputes the invoice status
    /// from the remaining payments, and decrements the enrollment's paid
    /// total by the deleted amount.
    ///
    /// # Arguments
    ///
    /// * `payment_id` - The payment to void
    pub async fn void_payment(&self, payment_id: Uuid) -> Result<(), PaymentError> {
        let mut tx = self.pool.begin().await?;

        let payment = lock_payment(&mut tx, payment_id).await?;
        let invoice = lock_invoice(&mut tx, payment.invoice_id).await?;
        let enrollment_row = lock_enrollment(&mut tx, invoice.enrollment_id).await?;

        sqlx::query("DELETE FROM payments WHERE payment_id = $1")
            .bind(payment_id)
            .execute(&mut *tx)
            .await?;

        let remaining_total =
            Money::new(payments_total(&mut tx, payment.invoice_id, None).await?);
        let status = derive_status(remaining_total, Money::new(invoice.amount));
        persist_invoice_status(&mut tx, payment.invoice_id, InvoiceStatus::from(status)).await?;

        let mut enrollment = Enrollment::from(enrollment_row);
        enrollment.reverse_payment(Money::new(payment.amount))?;
        persist_enrollment_paid(&mut tx, &enrollment).await?;

        tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Transaction helpers
// ============================================================================

/// Locks an invoice row for the remainder of the transaction
async fn lock_invoice(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
) -> Result<InvoiceRow, DatabaseError> {
    sqlx::query_as::<_, InvoiceRow>(
        r#"
        SELECT
            invoice_id, invoice_number, enrollment_id, amount, status,
            due_date, created_at, updated_at
        FROM invoices
        WHERE invoice_id = $1
        FOR UPDATE
        "#,
    )
    .bind(invoice_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| DatabaseError::not_found("Invoice", invoice_id))
}

/// Locks an enrollment row for the remainder of the transaction
async fn lock_enrollment(
    tx: &mut Transaction<'_, Postgres>,
    enrollment_id: Uuid,
) -> Result<EnrollmentRow, DatabaseError> {
    sqlx::query_as::<_, EnrollmentRow>(
        r#"
        SELECT
            enrollment_id, student_id, session_id, total_amount,
            paid_amount, enrolled_at, created_at, updated_at
        FROM enrollments
        WHERE enrollment_id = $1
        FOR UPDATE
        "#,
    )
    .bind(enrollment_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| DatabaseError::not_found("Enrollment", enrollment_id))
}

/// Locks a payment row for the remainder of the transaction
async fn lock_payment(
    tx: &mut Transaction<'_, Postgres>,
    payment_id: Uuid,
) -> Result<PaymentRow, DatabaseError> {
    sqlx::query_as::<_, PaymentRow>(
        r#"
        SELECT
            payment_id, invoice_id, amount, method, reference,
            paid_at, created_at, updated_at
        FROM payments
        WHERE payment_id = $1
        FOR UPDATE
        "#,
    )
    .bind(payment_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| DatabaseError::not_found("Payment", payment_id))
}

/// Sums the payments recorded against an invoice, optionally excluding one
///
/// Runs after the invoice row is locked, so the sum cannot move until the
/// transaction finishes.
async fn payments_total(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    excluding: Option<Uuid>,
) -> Result<Decimal, DatabaseError> {
    let total = match excluding {
        Some(payment_id) => {
            sqlx::query_scalar::<_, Decimal>(
                "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE invoice_id = $1 AND payment_id <> $2",
            )
            .bind(invoice_id)
            .bind(payment_id)
            .fetch_one(&mut **tx)
            .await?
        }
        None => {
            sqlx::query_scalar::<_, Decimal>(
                "SELECT COALESCE(SUM(amount), 0) FROM payments WHERE invoice_id = $1",
            )
            .bind(invoice_id)
            .fetch_one(&mut **tx)
            .await?
        }
    };

    Ok(total)
}

async fn persist_invoice_status(
    tx: &mut Transaction<'_, Postgres>,
    invoice_id: Uuid,
    status: InvoiceStatus,
) -> Result<(), DatabaseError> {
    sqlx::query("UPDATE invoices SET status = $2, updated_at = $3 WHERE invoice_id = $1")
        .bind(invoice_id)
        .bind(status)
        .bind(Utc::now())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

async fn persist_enrollment_paid(
    tx: &mut Transaction<'_, Postgres>,
    enrollment: &Enrollment,
) -> Result<(), DatabaseError> {
    sqlx::query("UPDATE enrollments SET paid_amount = $2, updated_at = $3 WHERE enrollment_id = $1")
        .bind(enrollment.id.as_uuid())
        .bind(enrollment.paid_amount.amount())
        .bind(enrollment.updated_at)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

// ============================================================================
// Database enum types
// ============================================================================

/// Invoice status as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "invoice_status", rename_all = "snake_case")]
pub enum InvoiceStatus {
    Unpaid,
    PartiallyPaid,
    Paid,
}

impl From<domain_billing::InvoiceStatus> for InvoiceStatus {
    fn from(status: domain_billing::InvoiceStatus) -> Self {
        match status {
            domain_billing::InvoiceStatus::Unpaid => InvoiceStatus::Unpaid,
            domain_billing::InvoiceStatus::PartiallyPaid => InvoiceStatus::PartiallyPaid,
            domain_billing::InvoiceStatus::Paid => InvoiceStatus::Paid,
        }
    }
}

impl From<InvoiceStatus> for domain_billing::InvoiceStatus {
    fn from(status: InvoiceStatus) -> Self {
        match status {
            InvoiceStatus::Unpaid => domain_billing::InvoiceStatus::Unpaid,
            InvoiceStatus::PartiallyPaid => domain_billing::InvoiceStatus::PartiallyPaid,
            InvoiceStatus::Paid => domain_billing::InvoiceStatus::Paid,
        }
    }
}

/// Payment method as stored in PostgreSQL
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
pub enum PaymentMethod {
    BankTransfer,
    Card,
    Cash,
    Check,
}

impl From<domain_billing::PaymentMethod> for PaymentMethod {
    fn from(method: domain_billing::PaymentMethod) -> Self {
        match method {
            domain_billing::PaymentMethod::BankTransfer => PaymentMethod::BankTransfer,
            domain_billing::PaymentMethod::Card => PaymentMethod::Card,
            domain_billing::PaymentMethod::Cash => PaymentMethod::Cash,
            domain_billing::PaymentMethod::Check => PaymentMethod::Check,
        }
    }
}

impl From<PaymentMethod> for domain_billing::PaymentMethod {
    fn from(method: PaymentMethod) -> Self {
        match method {
            PaymentMethod::BankTransfer => domain_billing::PaymentMethod::BankTransfer,
            PaymentMethod::Card => domain_billing::PaymentMethod::Card,
            PaymentMethod::Cash => domain_billing::PaymentMethod::Cash,
            PaymentMethod::Check => domain_billing::PaymentMethod::Check,
        }
    }
}

// ============================================================================
// Row types
// ============================================================================

/// Database row representation of an invoice
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceRow {
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub enrollment_id: Uuid,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: chrono::NaiveDate,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

/// An invoice together with the sum of its recorded payments
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceSummary {
    pub invoice_id: Uuid,
    pub invoice_number: String,
    pub enrollment_id: Uuid,
    pub amount: Decimal,
    pub status: InvoiceStatus,
    pub due_date: chrono::NaiveDate,
    pub amount_paid: Decimal,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}

/// Database row representation of a payment
#[derive(Debug, Clone, FromRow)]
pub struct PaymentRow {
    pub payment_id: Uuid,
    pub invoice_id: Uuid,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub reference: Option<String>,
    pub paid_at: chrono::DateTime<Utc>,
    pub created_at: chrono::DateTime<Utc>,
    pub updated_at: chrono::DateTime<Utc>,
}
