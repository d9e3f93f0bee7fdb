//! In-memory repositories for testing and development

use crate::core::query::{Page, PageRequest, paginate};
use crate::core::{ClientRepository, Entity, InvoiceRepository, UserRepository};
use crate::entities::{Client, Invoice, InvoiceFilter, User};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory collection of one entity type
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// clones share the same underlying map.
#[derive(Clone)]
pub struct InMemoryStore<T> {
    entities: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Entity> InMemoryStore<T> {
    /// Create a new, empty store
    pub fn new() -> Self {
        Self {
            entities: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn insert(&self, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        entities.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    fn fetch(&self, id: &Uuid) -> Result<Option<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(entities.get(id).cloned())
    }

    fn replace(&self, id: &Uuid, entity: T) -> Result<T> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if !entities.contains_key(id) {
            return Err(anyhow!(
                "{} not found: {}",
                T::resource_name_singular(),
                id
            ));
        }

        entities.insert(*id, entity.clone());

        Ok(entity)
    }

    /// Matching entities, newest first
    fn select(&self, predicate: impl Fn(&T) -> bool) -> Result<Vec<T>> {
        let entities = self
            .entities
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut selected: Vec<T> = entities.values().filter(|e| predicate(e)).cloned().collect();
        selected.sort_by(|a, b| b.created_at().cmp(&a.created_at()));

        Ok(selected)
    }

    /// Apply a mutation under the write lock
    fn modify<R>(&self, id: &Uuid, f: impl FnOnce(&mut T) -> R) -> Result<Option<R>> {
        let mut entities = self
            .entities
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(entities.get_mut(id).map(f))
    }
}

impl<T: Entity> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryStore<User> {
    async fn create(&self, user: User) -> Result<User> {
        self.insert(user)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<User>> {
        self.fetch(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self.select(|u| u.email == email)?.into_iter().next())
    }

    async fn update(&self, id: &Uuid, user: User) -> Result<User> {
        self.replace(id, user)
    }
}

#[async_trait]
impl ClientRepository for InMemoryStore<Client> {
    async fn create(&self, client: Client) -> Result<Client> {
        self.insert(client)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Client>> {
        self.fetch(id)
    }

    async fn update(&self, id: &Uuid, client: Client) -> Result<Client> {
        self.replace(id, client)
    }

    async fn list_by_user(&self, user_id: &Uuid) -> Result<Vec<Client>> {
        self.select(|c| &c.user_id == user_id)
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryStore<Invoice> {
    async fn create(&self, invoice: Invoice) -> Result<Invoice> {
        self.insert(invoice)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>> {
        self.fetch(id)
    }

    async fn find_by_client(
        &self,
        client_id: &Uuid,
        filter: InvoiceFilter,
        page: &PageRequest,
    ) -> Result<Page<Invoice>> {
        let matching = self.select(|i| &i.client_id == client_id && filter.matches(i))?;
        Ok(paginate(matching, page))
    }

    async fn count_by_client(&self, client_id: &Uuid) -> Result<u64> {
        Ok(self.select(|i| &i.client_id == client_id)?.len() as u64)
    }

    async fn mark_paid(&self, id: &Uuid, paid_at: DateTime<Utc>) -> Result<Option<Invoice>> {
        let outcome = self.modify(id, |invoice| {
            invoice.mark_paid(paid_at).then(|| invoice.clone())
        })?;

        Ok(outcome.flatten())
    }
}
