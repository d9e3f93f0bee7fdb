//! # Billing-RS
//!
//! Invoicing backend for freelancers and small businesses: users sign up,
//! manage their clients and issue invoices to them.
//!
//! ## Layers
//!
//! - **Entities**: `User`, `Client`, `Invoice` with their invariants
//! - **Repositories**: storage traits with in-memory and MongoDB backends
//! - **Use-cases**: one struct per business operation, validating input
//! - **Controllers**: axum handlers translating HTTP to use-cases
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use billing::prelude::*;
//!
//! let mut config = AppConfig::default();
//! config.auth.jwt_secret = "change-me".to_string();
//!
//! ServerBuilder::new(config)
//!     .with_repositories(Repositories::in_memory())
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod server;
pub mod storage;
pub mod usecases;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        BillingError, ClientRepository, Entity, InvoiceRepository, ListQuery, Page, PageRequest,
        PasswordHasher, TokenKind, TokenService, UserRepository,
    };

    // === Entities ===
    pub use crate::entities::{Client, Invoice, InvoiceFilter, InvoiceStatus, LineItem, User};

    // === Storage ===
    pub use crate::storage::{InMemoryStore, Repositories};

    // === Config ===
    pub use crate::config::{AppConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use uuid::Uuid;
}
