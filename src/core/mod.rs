//! Core module containing fundamental traits and types for the backend

pub mod auth;
pub mod entity;
pub mod error;
pub mod query;
pub mod repository;
pub mod timestamp;

pub use auth::{Claims, PasswordHasher, TokenKind, TokenPair, TokenService};
pub use entity::Entity;
pub use error::BillingError;
pub use query::{ListQuery, Page, PageRequest};
pub use repository::{ClientRepository, InvoiceRepository, UserRepository};
