//! Domain entities persisted by the billing backend

pub mod client;
pub mod invoice;
pub mod user;

pub use client::{Client, DEFAULT_CURRENCY};
pub use invoice::{Invoice, InvoiceFilter, InvoiceStatus, LineItem};
pub use user::User;
