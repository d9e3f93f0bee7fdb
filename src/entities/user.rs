use crate::core::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An account that owns clients and issues invoices
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Stored lower-cased; unique across users
    pub email: String,
    /// bcrypt hash; never leaves the server
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub company_name: Option<String>,
    pub address: Option<String>,
    #[serde(with = "crate::core::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "crate::core::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            email: normalize_email(email),
            password_hash,
            phone: None,
            company_name: None,
            address: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Copy of this user safe to put in a response body
    pub fn public(&self) -> Self {
        Self {
            password_hash: String::new(),
            ..self.clone()
        }
    }
}

/// Canonical form used for storing and looking up emails
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl Entity for User {
    fn resource_name() -> &'static str {
        "users"
    }

    fn resource_name_singular() -> &'static str {
        "user"
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
