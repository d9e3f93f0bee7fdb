//! Success envelope shared by every controller
//!
//! Successful bodies look like:
//!
//! ```json
//! { "message": "Invoice loaded", "success": true, "invoice": { … } }
//! ```

use crate::core::BillingError;
use anyhow::anyhow;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::{Map, Value};

/// `{ message, success: true, ...payload }`
#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    body: Map<String, Value>,
}

impl ApiResponse {
    fn new(status: StatusCode, message: &str) -> Self {
        let mut body = Map::new();
        body.insert("message".to_string(), Value::String(message.to_string()));
        body.insert("success".to_string(), Value::Bool(true));
        Self { status, body }
    }

    /// 200 OK
    pub fn ok(message: &str) -> Self {
        Self::new(StatusCode::OK, message)
    }

    /// 201 Created
    pub fn created(message: &str) -> Self {
        Self::new(StatusCode::CREATED, message)
    }

    /// Add a payload field next to `message` and `success`
    pub fn with(mut self, key: &str, value: impl Serialize) -> Result<Self, BillingError> {
        let value = serde_json::to_value(value)
            .map_err(|e| anyhow!("Failed to serialize '{}': {}", key, e))?;
        self.body.insert(key.to_string(), value);
        Ok(self)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, Json(Value::Object(self.body))).into_response()
    }
}
