//! Fake transport for testing
//!
//! Serves canned responses keyed by URL path suffix instead of making real
//! HTTP calls, and records every request it receives.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use crate::error::ClientError;
use crate::transport_types::{HttpTransport, RequestBody, TransportResponse};

/// Injected failure for the next N calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeFailure {
    Connection,
    Timeout,
}

/// One request as the fake saw it
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Fake transport for testing (uses fixture strings)
#[derive(Debug, Default)]
pub struct FakeTransport {
    routes: Vec<(String, TransportResponse)>,
    failure: Option<FakeFailure>,
    failures_left: AtomicU32,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to URLs ending with `suffix`
    pub fn with_route(mut self, suffix: &str, status: u16, body: &str) -> Self {
        self.routes
            .push((suffix.to_string(), TransportResponse::new(status, body)));
        self
    }

    /// Fail the next `times` calls before serving routes
    pub fn failing(mut self, failure: FakeFailure, times: u32) -> Self {
        self.failure = Some(failure);
        self.failures_left = AtomicU32::new(times);
        self
    }

    /// Fail every call
    pub fn unreachable() -> Self {
        Self::new().failing(FakeFailure::Connection, u32::MAX)
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn take_failure(&self) -> Option<FakeFailure> {
        let failure = self.failure?;
        self.failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| left.checked_sub(1))
            .ok()
            .map(|_| failure)
    }
}

#[async_trait]
impl HttpTransport for FakeTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: RequestBody,
    ) -> Result<TransportResponse, ClientError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(RecordedRequest {
                url: url.to_string(),
                headers: headers
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.clone()))
                    .collect(),
                body,
            });
        }

        match self.take_failure() {
            Some(FakeFailure::Connection) => {
                return Err(ClientError::Connection(format!("connection refused: {}", url)))
            }
            Some(FakeFailure::Timeout) => {
                return Err(ClientError::Timeout(format!("timed out: {}", url)))
            }
            None => {}
        }

        Ok(self
            .routes
            .iter()
            .find(|(suffix, _)| url.ends_with(suffix.as_str()))
            .map(|(_, response)| response.clone())
            .unwrap_or_else(|| TransportResponse::new(404, r#"{"message":"no fake route"}"#)))
    }
}
