//! SAF Gateway API Module
//!
//! The HTTP boundary of the gateway: header-based actor extraction, the
//! response envelope, error-to-status mapping and the route table.

pub mod error;
pub mod handlers;
pub mod models;
pub mod server;

pub use error::ApiError;
pub use handlers::{ApiState, AuthInfo, SharedState};
pub use models::*;
pub use server::*;
