//! Client controller: create, update, list a client's invoices

use crate::core::{BillingError, ListQuery};
use crate::server::extract::{ApiPath, ApiQuery, AuthUser, JsonBody};
use crate::server::response::ApiResponse;
use crate::server::state::AppState;
use crate::storage::Repositories;
use crate::usecases::{
    CreateClient, CreateClientInput, GetAllInvoices, UpdateClient, UpdateClientInput,
};
use axum::extract::State;
use uuid::Uuid;

pub struct ClientController {
    create_client: CreateClient,
    update_client: UpdateClient,
    get_all_invoices: GetAllInvoices,
}

impl ClientController {
    pub fn new(repositories: &Repositories, page_size: u64) -> Self {
        Self {
            create_client: CreateClient::new(
                repositories.users.clone(),
                repositories.clients.clone(),
            ),
            update_client: UpdateClient::new(repositories.clients.clone()),
            get_all_invoices: GetAllInvoices::new(
                repositories.clients.clone(),
                repositories.invoices.clone(),
                page_size,
            ),
        }
    }
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<AppState>,
    auth: AuthUser,
    JsonBody(input): JsonBody<CreateClientInput>,
) -> Result<ApiResponse, BillingError> {
    let client = state
        .clients
        .create_client
        .execute(input, auth.user_id)
        .await?;

    ApiResponse::created("new client created").with("client", &client)
}

/// PUT /api/clients/{client_id}
pub async fn update_client(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(client_id): ApiPath<Uuid>,
    JsonBody(input): JsonBody<UpdateClientInput>,
) -> Result<ApiResponse, BillingError> {
    let client = state
        .clients
        .update_client
        .execute(input, client_id, auth.user_id)
        .await?;

    ApiResponse::created("Client updated successfully").with("client", &client)
}

/// GET /api/clients/{client_id}/invoices?filter=&currentPage=
pub async fn get_all_invoices(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(client_id): ApiPath<Uuid>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<ApiResponse, BillingError> {
    let page = state
        .clients
        .get_all_invoices
        .execute(
            client_id,
            query.filter.as_deref(),
            query.current_page,
            auth.user_id,
        )
        .await?;

    ApiResponse::ok("Invoices loaded")
        .with("invoices", &page.invoices)?
        .with("totalPages", page.total_pages)
}
