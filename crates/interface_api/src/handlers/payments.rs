//! Payment handlers
//!
//! Every mutation here runs the reconciliation cascade in
//! `BillingRepository`: the payment row, the invoice status, and the
//! enrollment's paid total move together or not at all.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::{InvoiceId, Money};
use domain_billing::{Payment, PaymentAmendment};
use infra_db::repositories::BillingRepository;

use crate::dto::payments::{AmendPaymentRequest, PaymentResponse, RecordPaymentRequest};
use crate::{error::ApiError, AppState};

/// Records a payment against an invoice
///
/// Rejects non-positive amounts and amounts that would push the
/// invoice's cumulative paid total past its amount; the 400 message
/// carries the remaining payable balance.
pub async fn record_payment(
    State(state): State<AppState>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentResponse>), ApiError> {
    let mut payment = Payment::new(
        InvoiceId::from(request.invoice_id),
        Money::new(request.amount),
        request.method,
    )?;
    if let Some(reference) = request.reference {
        payment = payment.with_reference(reference);
    }
    if let Some(paid_at) = request.paid_at {
        payment = payment.with_paid_at(paid_at);
    }

    let repository = BillingRepository::new(state.pool.clone());
    let row = repository.record_payment(&payment).await?;

    Ok((StatusCode::CREATED, Json(PaymentResponse::from(row))))
}

/// Gets a payment by ID
pub async fn get_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let repository = BillingRepository::new(state.pool.clone());
    let row = repository.get_payment(id).await?;

    Ok(Json(PaymentResponse::from(row)))
}

/// Amends a payment
///
/// Omitted fields keep their stored value. An amount change re-runs
/// the overpayment guard against the other payments of the invoice
/// and moves the enrollment's paid total by the delta.
pub async fn amend_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AmendPaymentRequest>,
) -> Result<Json<PaymentResponse>, ApiError> {
    let amendment = PaymentAmendment {
        amount: request.amount.map(Money::new),
        method: request.method,
        reference: request.reference,
    };

    let repository = BillingRepository::new(state.pool.clone());
    let row = repository.amend_payment(id, amendment).await?;

    Ok(Json(PaymentResponse::from(row)))
}

/// Voids a payment
///
/// Returns 204; the invoice status and the enrollment's paid total
/// are rewound as if the payment had never been recorded.
pub async fn void_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repository = BillingRepository::new(state.pool.clone());
    repository.void_payment(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Lists the payments of an invoice in chronological order
pub async fn list_invoice_payments(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    let repository = BillingRepository::new(state.pool.clone());
    repository.get_invoice_summary(id).await?;

    let rows = repository.list_payments_for_invoice(id).await?;

    Ok(Json(rows.into_iter().map(PaymentResponse::from).collect()))
}
