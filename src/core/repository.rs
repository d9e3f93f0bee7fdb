//! Repository traits for users, clients and invoices
//!
//! Use-cases depend only on these traits; the storage backends in
//! [`crate::storage`] implement them. Storage failures surface as
//! `anyhow::Error` and become internal errors at the use-case boundary.

use crate::core::query::{Page, PageRequest};
use crate::entities::{Client, Invoice, InvoiceFilter, User};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Storage for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user
    async fn create(&self, user: User) -> Result<User>;

    /// Get a user by ID
    async fn get(&self, id: &Uuid) -> Result<Option<User>>;

    /// Find a user by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Replace an existing user; errors if it does not exist
    async fn update(&self, id: &Uuid, user: User) -> Result<User>;
}

/// Storage for clients
#[async_trait]
pub trait ClientRepository: Send + Sync {
    /// Insert a new client
    async fn create(&self, client: Client) -> Result<Client>;

    /// Get a client by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Client>>;

    /// Replace an existing client; errors if it does not exist
    async fn update(&self, id: &Uuid, client: Client) -> Result<Client>;

    /// All clients owned by a user, newest first
    async fn list_by_user(&self, user_id: &Uuid) -> Result<Vec<Client>>;
}

/// Storage for invoices
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Insert a new invoice
    async fn create(&self, invoice: Invoice) -> Result<Invoice>;

    /// Get an invoice by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>>;

    /// One page of a client's invoices matching `filter`, newest first
    async fn find_by_client(
        &self,
        client_id: &Uuid,
        filter: InvoiceFilter,
        page: &PageRequest,
    ) -> Result<Page<Invoice>>;

    /// Number of invoices ever issued to a client
    async fn count_by_client(&self, client_id: &Uuid) -> Result<u64>;

    /// Atomically flip an unpaid invoice to paid.
    ///
    /// Returns the updated invoice, or `None` when no unpaid invoice with
    /// this ID exists (missing, or already paid).
    async fn mark_paid(&self, id: &Uuid, paid_at: DateTime<Utc>) -> Result<Option<Invoice>>;
}
