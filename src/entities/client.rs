use crate::core::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Currency used when a client is created without one
pub const DEFAULT_CURRENCY: &str = "INR";

/// A billable company owned by exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    pub company_name: String,
    /// ISO 4217 code, upper-case
    pub currency: String,
    pub email: String,
    pub phone: String,
    /// Tax identifier
    pub pan_number: String,
    #[serde(with = "crate::core::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::core::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(
        user_id: Uuid,
        company_name: String,
        currency: Option<&str>,
        email: String,
        phone: String,
        pan_number: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            company_name,
            currency: currency
                .map(str::to_uppercase)
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            email,
            phone,
            pan_number: pan_number.to_uppercase(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_owned_by(&self, user_id: &Uuid) -> bool {
        &self.user_id == user_id
    }
}

impl Entity for Client {
    fn resource_name() -> &'static str {
        "clients"
    }

    fn resource_name_singular() -> &'static str {
        "client"
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
