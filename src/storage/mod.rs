//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;

pub use in_memory::InMemoryStore;
#[cfg(feature = "mongodb_backend")]
pub use mongodb::MongoStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::{ClientRepository, InvoiceRepository, UserRepository};
use crate::entities::{Client, Invoice, User};
use anyhow::Result;
use std::sync::Arc;

/// The three repository handles every controller is built from
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub clients: Arc<dyn ClientRepository>,
    pub invoices: Arc<dyn InvoiceRepository>,
}

impl Repositories {
    /// Fresh, empty in-memory repositories
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStore::<User>::new()),
            clients: Arc::new(InMemoryStore::<Client>::new()),
            invoices: Arc::new(InMemoryStore::<Invoice>::new()),
        }
    }

    /// MongoDB-backed repositories; creates indexes before returning
    #[cfg(feature = "mongodb_backend")]
    pub async fn mongodb(database: ::mongodb::Database) -> Result<Self> {
        let users = MongoStore::<User>::new(database.clone());
        let clients = MongoStore::<Client>::new(database.clone());
        let invoices = MongoStore::<Invoice>::new(database);

        users.ensure_indexes().await?;
        clients.ensure_indexes().await?;
        invoices.ensure_indexes().await?;

        Ok(Self {
            users: Arc::new(users),
            clients: Arc::new(clients),
            invoices: Arc::new(invoices),
        })
    }

    /// Build the repositories selected by configuration
    pub async fn from_config(config: &StorageConfig) -> Result<Self> {
        match config.backend {
            StorageBackend::InMemory => {
                tracing::warn!("Using in-memory storage; data is lost on shutdown");
                Ok(Self::in_memory())
            }
            #[cfg(feature = "mongodb_backend")]
            StorageBackend::Mongodb => {
                let uri = config
                    .mongodb_uri
                    .as_deref()
                    .ok_or_else(|| anyhow::anyhow!("storage.mongodb_uri is not set"))?;
                let client = ::mongodb::Client::with_uri_str(uri).await?;
                tracing::info!(database = %config.database, "Connected to MongoDB");
                Self::mongodb(client.database(&config.database)).await
            }
            #[cfg(not(feature = "mongodb_backend"))]
            StorageBackend::Mongodb => {
                anyhow::bail!("MongoDB storage requires the `mongodb_backend` feature")
            }
        }
    }
}
