//! Configuration loading and management
//!
//! Configuration is read from YAML (every section has defaults) and then
//! patched from the environment:
//!
//! | Variable | Overrides |
//! |---|---|
//! | `BILLING_CONFIG` | path of the YAML file to load |
//! | `BILLING_BIND_ADDR` | `server.bind_addr` |
//! | `BILLING_JWT_SECRET` | `auth.jwt_secret` |
//! | `BILLING_MONGODB_URI` | `storage.mongodb_uri` (and selects the MongoDB backend) |

use crate::core::query::DEFAULT_PAGE_SIZE;
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Upper bound for both token lifetimes (ten years)
pub const MAX_TOKEN_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Token and password hashing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for signing JWTs; must be non-empty
    pub jwt_secret: String,
    /// 1..=[`MAX_TOKEN_TTL_SECS`]
    pub access_token_ttl_secs: u64,
    /// 1..=[`MAX_TOKEN_TTL_SECS`]
    pub refresh_token_ttl_secs: u64,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            access_token_ttl_secs: 15 * 60,
            refresh_token_ttl_secs: 7 * 24 * 60 * 60,
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

/// Listing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub page_size: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Which document store backs the repositories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    #[default]
    InMemory,
    Mongodb,
}

/// Document store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub mongodb_uri: Option<String>,
    pub database: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::InMemory,
            mongodb_uri: None,
            database: "billing".to_string(),
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub pagination: PaginationConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Load from `BILLING_CONFIG` (if set), apply environment overrides and validate
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var("BILLING_CONFIG") {
            Ok(path) => {
                tracing::info!(path = %path, "Loading configuration file");
                Self::from_yaml_file(&path)?
            }
            Err(_) => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the environment in production)
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(addr) = lookup("BILLING_BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(secret) = lookup("BILLING_JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(uri) = lookup("BILLING_MONGODB_URI") {
            self.storage.mongodb_uri = Some(uri);
            self.storage.backend = StorageBackend::Mongodb;
        }
    }

    /// Reject configurations the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.auth.jwt_secret.trim().is_empty() {
            bail!("auth.jwt_secret must be set (or BILLING_JWT_SECRET)");
        }
        for (name, ttl) in [
            ("auth.access_token_ttl_secs", self.auth.access_token_ttl_secs),
            ("auth.refresh_token_ttl_secs", self.auth.refresh_token_ttl_secs),
        ] {
            if !(1..=MAX_TOKEN_TTL_SECS).contains(&ttl) {
                bail!("{} must be between 1 and {}", name, MAX_TOKEN_TTL_SECS);
            }
        }
        if self.pagination.page_size == 0 {
            bail!("pagination.page_size must be at least 1");
        }
        if self.storage.backend == StorageBackend::Mongodb && self.storage.mongodb_uri.is_none() {
            bail!("storage.mongodb_uri is required for the mongodb backend");
        }
        Ok(())
    }
}
