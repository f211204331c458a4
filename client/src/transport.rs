//! HTTP transport for the provider client
//!
//! Async POST-only transport; reqwest in production, fixtures in tests.

use async_trait::async_trait;

pub use crate::transport_fake::{FakeFailure, FakeTransport, RecordedRequest};
pub use crate::transport_reqwest::ReqwestTransport;
pub use crate::transport_types::{HttpTransport, RequestBody, TransportResponse};

use crate::error::ClientError;

/// Concrete transport enum
///
/// Wraps all transport types, so the API state needs no trait objects.
#[derive(Debug)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

#[async_trait]
impl HttpTransport for Transport {
    async fn post(
        &self,
        url: &str,
        headers: &[(&str, String)],
        body: RequestBody,
    ) -> Result<TransportResponse, ClientError> {
        match self {
            Transport::Real(t) => t.post(url, headers, body).await,
            Transport::Fake(t) => t.post(url, headers, body).await,
        }
    }
}

impl From<ReqwestTransport> for Transport {
    fn from(transport: ReqwestTransport) -> Self {
        Transport::Real(transport)
    }
}

impl From<FakeTransport> for Transport {
    fn from(transport: FakeTransport) -> Self {
        Transport::Fake(transport)
    }
}
