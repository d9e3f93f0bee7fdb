//! HTTP layer
//!
//! - [`ServerBuilder`]: wires configuration and repositories into a router
//! - controllers: one handler per route, each invoking a single use-case
//! - extractors and the JSON response envelope shared by all handlers

pub mod builder;
pub mod controllers;
pub mod extract;
pub mod response;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use extract::AuthUser;
pub use response::ApiResponse;
pub use router::build_router;
pub use state::AppState;
