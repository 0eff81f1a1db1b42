//! Invoice DTOs

use chrono::{DateTime, NaiveDate, Utc};
use core_kernel::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain_billing::InvoiceStatus;
use infra_db::repositories::billing::{InvoiceRow, InvoiceSummary};

#[derive(Debug, Deserialize)]
pub struct CreateInvoiceRequest {
    pub enrollment_id: Uuid,
    pub amount: Decimal,
    pub due_date: NaiveDate,
    /// Generated when omitted
    pub invoice_number: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub invoice_number: String,
    pub enrollment_id: Uuid,
    pub amount: Decimal,
    pub amount_paid: Decimal,
    pub remaining_balance: Decimal,
    pub status: InvoiceStatus,
    pub due_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<InvoiceSummary> for InvoiceResponse {
    fn from(summary: InvoiceSummary) -> Self {
        let remaining = Money::new(summary.amount)
            .saturating_sub(&Money::new(summary.amount_paid))
            .amount();

        Self {
            id: summary.invoice_id,
            invoice_number: summary.invoice_number,
            enrollment_id: summary.enrollment_id,
            amount: summary.amount,
            amount_paid: summary.amount_paid,
            remaining_balance: remaining,
            status: summary.status.into(),
            due_date: summary.due_date,
            created_at: summary.created_at,
            updated_at: summary.updated_at,
        }
    }
}

/// A freshly created invoice has no payments yet
impl From<InvoiceRow> for InvoiceResponse {
    fn from(row: InvoiceRow) -> Self {
        Self {
            id: row.invoice_id,
            invoice_number: row.invoice_number,
            enrollment_id: row.enrollment_id,
            amount: row.amount,
            amount_paid: Decimal::ZERO,
            remaining_balance: row.amount,
            status: row.status.into(),
            due_date: row.due_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
