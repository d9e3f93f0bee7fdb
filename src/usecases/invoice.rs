//! Invoice management use-cases

use super::owned_client;
use crate::core::{BillingError, ClientRepository, Entity, InvoiceRepository};
use crate::entities::{Invoice, LineItem};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Payload for issuing an invoice
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInvoiceInput {
    pub client_id: Uuid,
    #[validate(length(min = 1, message = "must contain at least one line item"))]
    pub items: Vec<LineItem>,
    pub due_date: Option<NaiveDate>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
}

impl CreateInvoiceInput {
    fn check_items(&self) -> Result<(), BillingError> {
        for (index, item) in self.items.iter().enumerate() {
            if item.description.trim().is_empty() {
                return Err(BillingError::validation(format!(
                    "items[{}].description: is required",
                    index
                )));
            }
            if item.quantity == 0 {
                return Err(BillingError::validation(format!(
                    "items[{}].quantity: must be greater than zero",
                    index
                )));
            }
            if item.unit_price < Decimal::ZERO {
                return Err(BillingError::validation(format!(
                    "items[{}].unitPrice: must not be negative",
                    index
                )));
            }
        }
        Ok(())
    }
}

/// Issues a new unpaid invoice against one of the user's clients
pub struct CreateInvoice {
    clients: Arc<dyn ClientRepository>,
    invoices: Arc<dyn InvoiceRepository>,
}

impl CreateInvoice {
    pub fn new(clients: Arc<dyn ClientRepository>, invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { clients, invoices }
    }

    pub async fn execute(
        &self,
        input: CreateInvoiceInput,
        user_id: Uuid,
    ) -> Result<Invoice, BillingError> {
        input.validate()?;
        input.check_items()?;

        let client = owned_client(self.clients.as_ref(), &input.client_id, &user_id).await?;
        let sequence = self.invoices.count_by_client(&client.id).await? + 1;

        let invoice = Invoice::issue(
            client.id,
            user_id,
            sequence,
            input.items,
            client.currency,
            input.due_date,
            input.notes,
        )?;
        let invoice = self.invoices.create(invoice).await?;

        tracing::info!(
            invoice_id = %invoice.id,
            client_id = %invoice.client_id,
            amount = %invoice.amount,
            "invoice created"
        );
        Ok(invoice)
    }
}

/// Transitions an invoice from unpaid to paid.
///
/// A second confirmation is rejected with a conflict and leaves the stored
/// invoice (and its `paidAt`) untouched.
pub struct ConfirmInvoicePayment {
    invoices: Arc<dyn InvoiceRepository>,
}

impl ConfirmInvoicePayment {
    pub fn new(invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoices }
    }

    pub async fn execute(&self, invoice_id: Uuid, user_id: Uuid) -> Result<Invoice, BillingError> {
        let invoice = owned_invoice(self.invoices.as_ref(), &invoice_id, &user_id).await?;

        if invoice.is_paid() {
            return Err(already_paid(&invoice_id));
        }

        let paid = self
            .invoices
            .mark_paid(&invoice_id, Utc::now())
            .await?
            .ok_or_else(|| already_paid(&invoice_id))?;

        tracing::info!(invoice_id = %invoice_id, "invoice payment confirmed");
        Ok(paid)
    }
}

fn already_paid(invoice_id: &Uuid) -> BillingError {
    BillingError::conflict(format!("Invoice '{}' is already paid", invoice_id))
}

/// Fetches a single invoice
pub struct GetInvoice {
    invoices: Arc<dyn InvoiceRepository>,
}

impl GetInvoice {
    pub fn new(invoices: Arc<dyn InvoiceRepository>) -> Self {
        Self { invoices }
    }

    pub async fn execute(&self, invoice_id: Uuid, user_id: Uuid) -> Result<Invoice, BillingError> {
        owned_invoice(self.invoices.as_ref(), &invoice_id, &user_id).await
    }
}

async fn owned_invoice(
    invoices: &dyn InvoiceRepository,
    invoice_id: &Uuid,
    user_id: &Uuid,
) -> Result<Invoice, BillingError> {
    invoices
        .get(invoice_id)
        .await?
        .filter(|invoice| &invoice.user_id == user_id)
        .ok_or_else(|| BillingError::not_found(Invoice::resource_name_singular(), *invoice_id))
}
