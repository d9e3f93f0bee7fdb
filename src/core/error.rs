//! Typed error handling for the billing backend
//!
//! Every use-case returns [`BillingError`]. Each variant maps to exactly one
//! HTTP status code, and every error is rendered with the same envelope the
//! successful responses use:
//!
//! ```json
//! { "message": "client with id '…' not found", "success": false }
//! ```
//!
//! # Error Categories
//!
//! - [`BillingError::Validation`]: malformed body, query or path, or a field rule failed (400)
//! - [`BillingError::Unauthorized`]: missing/invalid token or bad credentials (401)
//! - [`BillingError::NotFound`]: the addressed entity does not exist for this user (404)
//! - [`BillingError::Conflict`]: duplicate email, invoice already paid (409)
//! - [`BillingError::Internal`]: storage, hashing or signing failures (500)

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// The main error type returned by use-cases and controllers
#[derive(Debug, Error)]
pub enum BillingError {
    /// Input failed to parse or violated a field rule
    #[error("{0}")]
    Validation(String),

    /// Authentication is missing or invalid
    #[error("{0}")]
    Unauthorized(String),

    /// Entity was not found (or belongs to another user)
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// The operation conflicts with the current state
    #[error("{0}")]
    Conflict(String),

    /// Infrastructure failure (storage, hashing, token signing)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub message: String,
    /// Always `false`
    pub success: bool,
}

impl BillingError {
    pub fn validation(message: impl Into<String>) -> Self {
        BillingError::Validation(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        BillingError::Unauthorized(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        BillingError::Conflict(message.into())
    }

    pub fn not_found(entity: &'static str, id: Uuid) -> Self {
        BillingError::NotFound { entity, id }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            BillingError::Validation(_) => StatusCode::BAD_REQUEST,
            BillingError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            BillingError::NotFound { .. } => StatusCode::NOT_FOUND,
            BillingError::Conflict(_) => StatusCode::CONFLICT,
            BillingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            BillingError::Validation(_) => "VALIDATION_ERROR",
            BillingError::Unauthorized(_) => "UNAUTHORIZED",
            BillingError::NotFound { .. } => "NOT_FOUND",
            BillingError::Conflict(_) => "CONFLICT",
            BillingError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            message: self.to_string(),
            success: false,
        }
    }
}

impl IntoResponse for BillingError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let BillingError::Internal(err) = &self {
            tracing::error!(error = ?err, "request failed");
        } else {
            tracing::debug!(code = self.error_code(), message = %self, "request rejected");
        }

        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ValidationErrors> for BillingError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => format!("{}: {}", field, message),
                    None => format!("{}: invalid ({})", field, e.code),
                })
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            return BillingError::Validation("Invalid input".to_string());
        }

        BillingError::Validation(messages.join(", "))
    }
}
