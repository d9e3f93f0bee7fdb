//! HTTP controllers
//!
//! Each controller owns the use-cases for one resource; each handler
//! extracts its parameters, invokes exactly one use-case and serializes
//! the result into the JSON envelope.

pub mod client;
pub mod invoice;
pub mod user;

pub use client::ClientController;
pub use invoice::InvoiceController;
pub use user::UserController;
