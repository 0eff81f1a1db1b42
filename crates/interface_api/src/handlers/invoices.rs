//! Invoice handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::{EnrollmentId, Money};
use domain_billing::Invoice;
use infra_db::repositories::{BillingRepository, EnrollmentRepository};

use crate::dto::invoices::{CreateInvoiceRequest, InvoiceResponse};
use crate::{error::ApiError, AppState};

/// Creates a new invoice against an enrollment
///
/// The enrollment must exist (404 otherwise). Non-positive amounts
/// are rejected (400). The invoice starts unpaid.
pub async fn create_invoice(
    State(state): State<AppState>,
    Json(request): Json<CreateInvoiceRequest>,
) -> Result<(StatusCode, Json<InvoiceResponse>), ApiError> {
    let enrollments = EnrollmentRepository::new(state.pool.clone());
    enrollments.get_by_id(request.enrollment_id).await?;

    let mut invoice = Invoice::new(
        EnrollmentId::from(request.enrollment_id),
        Money::new(request.amount),
        request.due_date,
    )?;
    if let Some(number) = request.invoice_number {
        invoice = invoice.with_invoice_number(number);
    }

    let repository = BillingRepository::new(state.pool.clone());
    let row = repository.create_invoice(&invoice).await?;

    Ok((StatusCode::CREATED, Json(InvoiceResponse::from(row))))
}

/// Gets an invoice by ID, including its paid total, remaining
/// balance, and derived status
pub async fn get_invoice(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InvoiceResponse>, ApiError> {
    let repository = BillingRepository::new(state.pool.clone());
    let summary = repository.get_invoice_summary(id).await?;

    Ok(Json(InvoiceResponse::from(summary)))
}

/// Lists the invoices of an enrollment
pub async fn list_enrollment_invoices(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<InvoiceResponse>>, ApiError> {
    let enrollments = EnrollmentRepository::new(state.pool.clone());
    enrollments.get_by_id(id).await?;

    let repository = BillingRepository::new(state.pool.clone());
    let summaries = repository.list_invoices_for_enrollment(id).await?;

    Ok(Json(summaries.into_iter().map(InvoiceResponse::from).collect()))
}
