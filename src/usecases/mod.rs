//! Use-cases: one struct per business operation
//!
//! Each use-case receives its repository handles through `new` and exposes a
//! single `execute` method. Input payloads are validated here, so the rules
//! hold no matter which transport calls them.

pub mod client;
pub mod invoice;
pub mod user;

pub use client::{
    CreateClient, CreateClientInput, GetAllInvoices, InvoicePage, UpdateClient, UpdateClientInput,
};
pub use invoice::{ConfirmInvoicePayment, CreateInvoice, CreateInvoiceInput, GetInvoice};
pub use user::{
    CreateUser, GetMyClients, GetSingleClient, GetUserProfile, LoginInput, LoginUser, SignupInput,
    UpdateUser, UpdateUserInput,
};

use crate::core::{BillingError, ClientRepository, Entity};
use crate::entities::Client;
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

/// Indian PAN: five letters, four digits, one letter
pub(crate) static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[a-z]{5}[0-9]{4}[a-z]$").expect("valid PAN regex"));

/// Three-letter currency code
pub(crate) static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{3}$").expect("valid currency regex"));

/// Load a client that belongs to `user_id`.
///
/// A client owned by someone else is reported exactly like a missing one.
pub(crate) async fn owned_client(
    clients: &dyn ClientRepository,
    client_id: &Uuid,
    user_id: &Uuid,
) -> Result<Client, BillingError> {
    clients
        .get(client_id)
        .await?
        .filter(|client| client.is_owned_by(user_id))
        .ok_or_else(|| BillingError::not_found(Client::resource_name_singular(), *client_id))
}
