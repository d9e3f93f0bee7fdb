//! Invoice controller: create, confirm payment, fetch

use crate::core::BillingError;
use crate::server::extract::{ApiPath, AuthUser, JsonBody};
use crate::server::response::ApiResponse;
use crate::server::state::AppState;
use crate::storage::Repositories;
use crate::usecases::{ConfirmInvoicePayment, CreateInvoice, CreateInvoiceInput, GetInvoice};
use axum::extract::State;
use uuid::Uuid;

pub struct InvoiceController {
    create_invoice: CreateInvoice,
    confirm_invoice_payment: ConfirmInvoicePayment,
    get_invoice: GetInvoice,
}

impl InvoiceController {
    pub fn new(repositories: &Repositories) -> Self {
        Self {
            create_invoice: CreateInvoice::new(
                repositories.clients.clone(),
                repositories.invoices.clone(),
            ),
            confirm_invoice_payment: ConfirmInvoicePayment::new(repositories.invoices.clone()),
            get_invoice: GetInvoice::new(repositories.invoices.clone()),
        }
    }
}

/// POST /api/invoices
pub async fn create_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(input): JsonBody<CreateInvoiceInput>,
) -> Result<ApiResponse, BillingError> {
    let invoice = state
        .invoices
        .create_invoice
        .execute(input, auth.user_id)
        .await?;

    ApiResponse::created("new invoice created").with("invoice", &invoice)
}

/// PATCH /api/invoices/{invoice_id}/pay
pub async fn confirm_invoice_payment(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(invoice_id): ApiPath<Uuid>,
) -> Result<ApiResponse, BillingError> {
    let invoice = state
        .invoices
        .confirm_invoice_payment
        .execute(invoice_id, auth.user_id)
        .await?;

    ApiResponse::created("Invoice updated").with("invoice", &invoice)
}

/// GET /api/invoices/{invoice_id}
pub async fn get_invoice(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(invoice_id): ApiPath<Uuid>,
) -> Result<ApiResponse, BillingError> {
    let invoice = state
        .invoices
        .get_invoice
        .execute(invoice_id, auth.user_id)
        .await?;

    ApiResponse::ok("Invoice loaded").with("invoice", &invoice)
}
