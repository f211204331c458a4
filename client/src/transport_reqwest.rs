//! Real HTTP transport using reqwest

use async_trait::async_trait;
use std::time::Duration;

use crate::error::ClientError;
use crate::transport_types::{HttpTransport, RequestBody, TransportResponse};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Real HTTP transport using reqwest.
///
/// Environment proxies are ignored; the provider sits on the internal
/// network.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create transport with the default timeout (30s)
    pub fn new() -> Result<Self, ClientError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| ClientError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: RequestBody,
    ) -> Result<TransportResponse, ClientError> {
        let mut request = self.client.post(url);

        for (key, value) in headers {
            request = request.header(*key, value.as_str());
        }

        request = match body {
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Form(pairs) => request.form(&pairs),
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(TransportResponse { status, body })
    }
}
