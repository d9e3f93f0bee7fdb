//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoStore<T>`, implementing every repository trait for its
//! entity type, backed by a MongoDB database via `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag.
//!
//! # Storage model
//!
//! One collection per entity type, named after `T::resource_name()`
//! ("users", "clients", "invoices").
//!
//! # Serialization strategy
//!
//! Entities are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. UUIDs, decimals and timestamps are
//! therefore stored as strings. The `id` field is mapped to MongoDB's `_id`
//! convention. Field names are the entities' camelCase JSON names.

use crate::core::query::{Page, PageRequest};
use crate::core::timestamp;
use crate::core::{ClientRepository, Entity, InvoiceRepository, UserRepository};
use crate::entities::{Client, Invoice, InvoiceFilter, InvoiceStatus, User};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Database, IndexModel};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain entity convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

/// Timestamps are stored in the same fixed-width string form entities
/// serialize to, so `createdAt` sorts chronologically.
fn timestamp_bson(at: &DateTime<Utc>) -> Bson {
    Bson::String(timestamp::format(at))
}

// ---------------------------------------------------------------------------
// MongoStore<T>
// ---------------------------------------------------------------------------

/// Generic collection wrapper backed by MongoDB.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use billing::storage::MongoStore;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let db = client.database("billing");
/// let invoices = MongoStore::<Invoice>::new(db);
/// ```
#[derive(Clone, Debug)]
pub struct MongoStore<T> {
    database: Database,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Entity> MongoStore<T> {
    /// Create a new `MongoStore` with the given database handle.
    pub fn new(database: Database) -> Self {
        Self {
            database,
            _marker: std::marker::PhantomData,
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(T::resource_name())
    }

    fn entity_to_document(entity: &T) -> Result<Document> {
        let json = serde_json::to_value(entity)
            .map_err(|e| anyhow!("Failed to serialize {}: {}", T::resource_name_singular(), e))?;
        json_to_document(json)
    }

    fn document_to_entity(doc: Document) -> Result<T> {
        let json = document_to_json(doc);
        serde_json::from_value(json).map_err(|e| {
            anyhow!(
                "Failed to deserialize {} from document: {}",
                T::resource_name_singular(),
                e
            )
        })
    }

    async fn insert(&self, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create {}: {}", T::resource_name_singular(), e))?;

        Ok(entity)
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        let doc = self
            .collection()
            .find_one(filter)
            .await
            .map_err(|e| anyhow!("Failed to get {}: {}", T::resource_name_singular(), e))?;

        doc.map(Self::document_to_entity).transpose()
    }

    async fn fetch(&self, id: &Uuid) -> Result<Option<T>> {
        self.find_one(doc! { "_id": uuid_bson(id) }).await
    }

    /// Returns `Err` if the entity does not exist (no document matched).
    async fn replace(&self, id: &Uuid, entity: T) -> Result<T> {
        let doc = Self::entity_to_document(&entity)?;

        let result = self
            .collection()
            .replace_one(doc! { "_id": uuid_bson(id) }, doc)
            .await
            .map_err(|e| anyhow!("Failed to update {}: {}", T::resource_name_singular(), e))?;

        if result.matched_count == 0 {
            return Err(anyhow!(
                "{} not found: {}",
                T::resource_name_singular(),
                id
            ));
        }

        Ok(entity)
    }

    /// Matching documents, newest first, optionally windowed
    async fn select(&self, filter: Document, window: Option<&PageRequest>) -> Result<Vec<T>> {
        let collection = self.collection();
        let mut find = collection
            .find(filter)
            .sort(doc! { "createdAt": -1 });

        if let Some(page) = window {
            // skip and limit travel as BSON int64
            if i64::try_from(page.offset()).is_err() {
                return Ok(Vec::new());
            }
            find = find
                .skip(page.offset())
                .limit(i64::try_from(page.page_size).unwrap_or(i64::MAX));
        }

        let cursor = find
            .await
            .map_err(|e| anyhow!("Failed to list {}: {}", T::resource_name(), e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect {}: {}", T::resource_name(), e))?;

        docs.into_iter().map(Self::document_to_entity).collect()
    }

    async fn count(&self, filter: Document) -> Result<u64> {
        self.collection()
            .count_documents(filter)
            .await
            .map_err(|e| anyhow!("Failed to count {}: {}", T::resource_name(), e))
    }

    async fn create_indexes(&self, indexes: Vec<IndexModel>) -> Result<()> {
        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| {
                anyhow!(
                    "Failed to create indexes on {} collection: {}",
                    T::resource_name(),
                    e
                )
            })?;

        Ok(())
    }
}

impl MongoStore<User> {
    /// Unique index on `email`. Idempotent, safe to call on every startup.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let unique = mongodb::options::IndexOptions::builder()
            .unique(true)
            .build();

        self.create_indexes(vec![
            IndexModel::builder()
                .keys(doc! { "email": 1 })
                .options(unique)
                .build(),
        ])
        .await
    }
}

impl MongoStore<Client> {
    /// Index on `userId, createdAt` for "my clients" listings.
    pub async fn ensure_indexes(&self) -> Result<()> {
        self.create_indexes(vec![
            IndexModel::builder()
                .keys(doc! { "userId": 1, "createdAt": -1 })
                .build(),
        ])
        .await
    }
}

impl MongoStore<Invoice> {
    /// Indexes on `clientId, createdAt` and `clientId, status, createdAt`
    /// for paginated, filtered listings.
    pub async fn ensure_indexes(&self) -> Result<()> {
        self.create_indexes(vec![
            IndexModel::builder()
                .keys(doc! { "clientId": 1, "createdAt": -1 })
                .build(),
            IndexModel::builder()
                .keys(doc! { "clientId": 1, "status": 1, "createdAt": -1 })
                .build(),
        ])
        .await
    }

    fn client_filter(client_id: &Uuid, filter: InvoiceFilter) -> Document {
        let mut query = doc! { "clientId": uuid_bson(client_id) };
        if let Some(status) = filter.status() {
            query.insert("status", status.as_str());
        }
        query
    }
}

#[async_trait]
impl UserRepository for MongoStore<User> {
    async fn create(&self, user: User) -> Result<User> {
        self.insert(user).await
    }

    async fn get(&self, id: &Uuid) -> Result<Option<User>> {
        self.fetch(id).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_one(doc! { "email": email }).await
    }

    async fn update(&self, id: &Uuid, user: User) -> Result<User> {
        self.replace(id, user).await
    }
}

#[async_trait]
impl ClientRepository for MongoStore<Client> {
    async fn create(&self, client: Client) -> Result<Client> {
        self.insert(client).await
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Client>> {
        self.fetch(id).await
    }

    async fn update(&self, id: &Uuid, client: Client) -> Result<Client> {
        self.replace(id, client).await
    }

    async fn list_by_user(&self, user_id: &Uuid) -> Result<Vec<Client>> {
        self.select(doc! { "userId": uuid_bson(user_id) }, None).await
    }
}

#[async_trait]
impl InvoiceRepository for MongoStore<Invoice> {
    async fn create(&self, invoice: Invoice) -> Result<Invoice> {
        self.insert(invoice).await
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>> {
        self.fetch(id).await
    }

    async fn find_by_client(
        &self,
        client_id: &Uuid,
        filter: InvoiceFilter,
        page: &PageRequest,
    ) -> Result<Page<Invoice>> {
        let query = Self::client_filter(client_id, filter);
        let total = self.count(query.clone()).await?;
        if page.offset() >= total {
            return Ok(Page::new(Vec::new(), total, page));
        }
        let items = self.select(query, Some(page)).await?;

        Ok(Page::new(items, total, page))
    }

    async fn count_by_client(&self, client_id: &Uuid) -> Result<u64> {
        self.count(doc! { "clientId": uuid_bson(client_id) }).await
    }

    /// Conditional update on `status: unpaid`, so concurrent confirmations
    /// cannot both succeed.
    async fn mark_paid(&self, id: &Uuid, paid_at: DateTime<Utc>) -> Result<Option<Invoice>> {
        let stamp = timestamp_bson(&paid_at);

        let updated = self
            .collection()
            .find_one_and_update(
                doc! { "_id": uuid_bson(id), "status": InvoiceStatus::Unpaid.as_str() },
                doc! { "$set": {
                    "status": InvoiceStatus::Paid.as_str(),
                    "paidAt": stamp.clone(),
                    "updatedAt": stamp,
                } },
            )
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to mark invoice paid: {}", e))?;

        updated.map(Self::document_to_entity).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_round_trip_renames_id() {
        let user = User::new("Meera".into(), "meera@example.com", "hash".into());
        let doc = MongoStore::<User>::entity_to_document(&user).unwrap();

        assert_eq!(doc.get_str("_id").unwrap(), user.id.to_string());
        assert!(!doc.contains_key("id"));

        let back = MongoStore::<User>::document_to_entity(doc).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_timestamps_stored_fixed_width() {
        let mut user = User::new("Meera".into(), "meera@example.com", "hash".into());
        user.created_at = chrono::TimeZone::with_ymd_and_hms(&Utc, 2026, 3, 1, 9, 0, 0).unwrap();
        let doc = MongoStore::<User>::entity_to_document(&user).unwrap();

        assert_eq!(doc.get_str("createdAt").unwrap(), "2026-03-01T09:00:00.000000000Z");
        assert_eq!(
            timestamp_bson(&user.created_at),
            Bson::String("2026-03-01T09:00:00.000000000Z".into())
        );
    }

    #[test]
    fn test_client_filter_adds_status_only_when_filtered() {
        let client_id = Uuid::new_v4();

        let all = MongoStore::<Invoice>::client_filter(&client_id, InvoiceFilter::All);
        assert!(!all.contains_key("status"));

        let paid = MongoStore::<Invoice>::client_filter(&client_id, InvoiceFilter::Paid);
        assert_eq!(paid.get_str("status").unwrap(), "paid");
        assert_eq!(paid.get_str("clientId").unwrap(), client_id.to_string());
    }
}
