//! Authentication primitives
//!
//! Provides:
//! - [`TokenService`]: issues and verifies access/refresh JWT pairs
//! - [`PasswordHasher`]: bcrypt hashing and verification off the async runtime

use crate::config::{AuthConfig, MAX_TOKEN_TTL_SECS};
use crate::core::BillingError;
use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which half of the pair a token is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// JWT claims carried by both token kinds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time
    pub exp: i64,
    /// Issued at
    pub iat: i64,
    /// JWT ID
    pub jti: String,
    pub kind: TokenKind,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, BillingError> {
        Uuid::parse_str(&self.sub).map_err(|_| BillingError::unauthorized("Invalid token subject"))
    }
}

/// Access + refresh tokens issued on login
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime of the refresh token, in seconds (cookie `Max-Age`)
    pub refresh_expires_in: i64,
}

/// Issues and verifies HS256 JWTs
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            access_token_ttl: ttl(config.access_token_ttl_secs),
            refresh_token_ttl: ttl(config.refresh_token_ttl_secs),
        }
    }

    /// Generate a token pair (access + refresh tokens)
    pub fn generate_pair(&self, user_id: &Uuid) -> Result<TokenPair, BillingError> {
        Ok(TokenPair {
            access_token: self.sign(user_id, TokenKind::Access, self.access_token_ttl)?,
            refresh_token: self.sign(user_id, TokenKind::Refresh, self.refresh_token_ttl)?,
            refresh_expires_in: self.refresh_token_ttl.num_seconds(),
        })
    }

    /// Generate a fresh access token only
    pub fn generate_access(&self, user_id: &Uuid) -> Result<String, BillingError> {
        self.sign(user_id, TokenKind::Access, self.access_token_ttl)
    }

    /// Validate a token and check it is of the expected kind
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, BillingError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default()).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => BillingError::unauthorized("Token has expired"),
                ErrorKind::InvalidSignature => {
                    BillingError::unauthorized("Invalid token signature")
                }
                _ => BillingError::unauthorized("Invalid token"),
            },
        )?;

        if data.claims.kind != expected {
            return Err(BillingError::unauthorized("Wrong token type"));
        }

        Ok(data.claims)
    }

    fn sign(&self, user_id: &Uuid, kind: TokenKind, ttl: Duration) -> Result<String, BillingError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
            kind,
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| BillingError::Internal(anyhow!("Failed to sign token: {}", e)))
    }
}

/// Capped at [`MAX_TOKEN_TTL_SECS`], the bound `AppConfig::validate` enforces
fn ttl(secs: u64) -> Duration {
    Duration::seconds(secs.min(MAX_TOKEN_TTL_SECS) as i64)
}

/// bcrypt password hashing
///
/// Hashing is CPU bound, so both operations run on the blocking pool.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub async fn hash(&self, password: &str) -> Result<String, BillingError> {
        let password = password.to_owned();
        let cost = self.cost;
        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(|e| anyhow!("Password hashing task failed: {}", e))?
            .map_err(|e| BillingError::Internal(anyhow!("Failed to hash password: {}", e)))
    }

    /// `Ok(false)` on mismatch; a malformed stored hash is treated as a mismatch
    pub async fn verify(&self, password: &str, hash: &str) -> Result<bool, BillingError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| anyhow!("Password verification task failed: {}", e))?;

        Ok(verified.unwrap_or(false))
    }
}
