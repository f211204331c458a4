//! Transport types
//!
//! Common types shared across transport implementations.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ClientError;

/// Outbound request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// `application/json`
    Json(Value),
    /// `application/x-www-form-urlencoded`
    Form(Vec<(String, String)>),
}

/// Status and raw body of a completed exchange.
///
/// Any status is a completed exchange; deciding what a 401 or 404 means is
/// left to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Result<Value, ClientError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Asynchronous HTTP transport.
///
/// Abstraction over the HTTP client so `SafClient` can be tested with
/// `FakeTransport`. Errors are reserved for exchanges that never completed
/// (connect failures, timeouts).
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: RequestBody,
    ) -> Result<TransportResponse, ClientError>;
}
