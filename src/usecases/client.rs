//! Client management use-cases

use super::{CURRENCY_RE, PAN_RE, owned_client};
use crate::core::query::PageRequest;
use crate::core::{BillingError, ClientRepository, Entity, InvoiceRepository, UserRepository};
use crate::entities::{Client, Invoice, InvoiceFilter, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Payload for creating a client
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientInput {
    #[validate(length(min = 1, max = 200, message = "is required"))]
    pub company_name: String,
    #[validate(regex(path = *CURRENCY_RE, message = "must be a three-letter currency code"))]
    pub currency: Option<String>,
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 1, max = 32, message = "is required"))]
    pub phone: String,
    #[validate(regex(path = *PAN_RE, message = "must look like ABCDE1234F"))]
    pub pan_number: String,
}

/// Partial update of a client
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientInput {
    #[validate(length(min = 1, max = 200, message = "must not be empty"))]
    pub company_name: Option<String>,
    #[validate(regex(path = *CURRENCY_RE, message = "must be a three-letter currency code"))]
    pub currency: Option<String>,
    #[validate(email(message = "must be a valid email"))]
    pub email: Option<String>,
    #[validate(length(min = 1, max = 32, message = "must not be empty"))]
    pub phone: Option<String>,
    #[validate(regex(path = *PAN_RE, message = "must look like ABCDE1234F"))]
    pub pan_number: Option<String>,
}

/// Creates a client owned by the authenticated user
pub struct CreateClient {
    users: Arc<dyn UserRepository>,
    clients: Arc<dyn ClientRepository>,
}

impl CreateClient {
    pub fn new(users: Arc<dyn UserRepository>, clients: Arc<dyn ClientRepository>) -> Self {
        Self { users, clients }
    }

    pub async fn execute(
        &self,
        input: CreateClientInput,
        user_id: Uuid,
    ) -> Result<Client, BillingError> {
        input.validate()?;

        if self.users.get(&user_id).await?.is_none() {
            return Err(BillingError::not_found(
                User::resource_name_singular(),
                user_id,
            ));
        }

        let client = Client::new(
            user_id,
            input.company_name,
            input.currency.as_deref(),
            input.email,
            input.phone,
            input.pan_number,
        );
        let client = self.clients.create(client).await?;

        tracing::info!(client_id = %client.id, user_id = %user_id, "client created");
        Ok(client)
    }
}

/// Applies a partial update to one of the user's clients
pub struct UpdateClient {
    clients: Arc<dyn ClientRepository>,
}

impl UpdateClient {
    pub fn new(clients: Arc<dyn ClientRepository>) -> Self {
        Self { clients }
    }

    pub async fn execute(
        &self,
        input: UpdateClientInput,
        client_id: Uuid,
        user_id: Uuid,
    ) -> Result<Client, BillingError> {
        input.validate()?;

        let mut client = owned_client(self.clients.as_ref(), &client_id, &user_id).await?;

        if let Some(company_name) = input.company_name {
            client.company_name = company_name;
        }
        if let Some(currency) = input.currency {
            client.currency = currency.to_uppercase();
        }
        if let Some(email) = input.email {
            client.email = email;
        }
        if let Some(phone) = input.phone {
            client.phone = phone;
        }
        if let Some(pan_number) = input.pan_number {
            client.pan_number = pan_number.to_uppercase();
        }
        client.touch();

        let client = self.clients.update(&client_id, client).await?;

        tracing::info!(client_id = %client_id, "client updated");
        Ok(client)
    }
}

/// One page of a client's invoices
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoicePage {
    pub invoices: Vec<Invoice>,
    pub total_pages: u64,
}

/// Lists a client's invoices with a status filter and pagination
pub struct GetAllInvoices {
    clients: Arc<dyn ClientRepository>,
    invoices: Arc<dyn InvoiceRepository>,
    page_size: u64,
}

impl GetAllInvoices {
    pub fn new(
        clients: Arc<dyn ClientRepository>,
        invoices: Arc<dyn InvoiceRepository>,
        page_size: u64,
    ) -> Self {
        Self {
            clients,
            invoices,
            page_size,
        }
    }

    pub async fn execute(
        &self,
        client_id: Uuid,
        filter: Option<&str>,
        current_page: Option<u64>,
        user_id: Uuid,
    ) -> Result<InvoicePage, BillingError> {
        let filter = InvoiceFilter::parse(filter)?;
        let request = PageRequest::new(current_page, self.page_size);

        owned_client(self.clients.as_ref(), &client_id, &user_id).await?;

        let page = self
            .invoices
            .find_by_client(&client_id, filter, &request)
            .await?;

        tracing::debug!(
            client_id = %client_id,
            page = request.page,
            total = page.total,
            "invoices listed"
        );

        Ok(InvoicePage {
            total_pages: page.total_pages(),
            invoices: page.items,
        })
    }
}
