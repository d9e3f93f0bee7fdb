//! Entity trait shared by every stored document type

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for all persisted entities.
///
/// Every document the backend stores has:
/// - id: Unique identifier (stored as `_id` in document stores)
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
///
/// Storage backends are generic over this trait: the resource name doubles
/// as the collection name, and the singular name is what error messages use.
pub trait Entity: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The plural resource name, used as the collection name (e.g., "clients")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "client")
    fn resource_name_singular() -> &'static str;

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Bump `updated_at` to now
    fn touch(&mut self);
}
