//! Shared application state

use super::controllers::{ClientController, InvoiceController, UserController};
use crate::config::AppConfig;
use crate::core::{PasswordHasher, TokenService};
use crate::storage::Repositories;
use std::sync::Arc;

/// Application state shared across handlers
///
/// Controllers own their use-cases, which own their repository handles;
/// everything is built once here and injected.
#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<ClientController>,
    pub invoices: Arc<InvoiceController>,
    pub users: Arc<UserController>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(config: &AppConfig, repositories: &Repositories) -> Self {
        let hasher = PasswordHasher::new(config.auth.bcrypt_cost);

        Self {
            clients: Arc::new(ClientController::new(
                repositories,
                config.pagination.page_size,
            )),
            invoices: Arc::new(InvoiceController::new(repositories)),
            users: Arc::new(UserController::new(repositories, hasher)),
            tokens: Arc::new(TokenService::new(&config.auth)),
        }
    }
}
