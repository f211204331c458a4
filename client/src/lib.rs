//! SAF Gateway Client
//!
//! Async client for the SAF test-management provider: login, project
//! listing, firmware and summary documents, dashboards and known issues.
//! Responses are returned as raw JSON; reshaping lives in `safgate-core`.

pub mod error;
pub mod retry;
pub mod saf;
pub mod transport;
mod transport_fake;
mod transport_reqwest;
mod transport_types;

pub use error::{ApiErrorCode, ClientError};
pub use retry::RetryPolicy;
pub use saf::{Actor, ClientConfig, Credentials, LoginResponse, SafClient};
pub use transport::{
    FakeFailure, FakeTransport, HttpTransport, RecordedRequest, ReqwestTransport, RequestBody,
    Transport, TransportResponse,
};
