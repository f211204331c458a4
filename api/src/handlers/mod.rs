//! API Handlers Module
//!
//! Request handlers for the gateway. Service endpoints live here; login and
//! project endpoints are in their own submodules.

use axum::{debug_handler, extract::State, response::Json};
use chrono::Utc;
use safgate_client::{ClientError, SafClient, Transport};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{ApiResponse, HealthResponse, PublicConfig, ServiceInfo};

pub mod auth;
pub mod projects;

pub use auth::{login, login_with_config, AuthInfo};
pub use projects::{
    full_summary, known_issues, list_projects, project_dashboard, project_firmware_summary,
    project_firmwares, project_test_details, project_test_summary, projects_summary,
};

pub const SERVICE_NAME: &str = "SAF Gateway";
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVICE_DESCRIPTION: &str = "API Server for accessing SAF test-management data";

/// Represents the state of the API server
pub struct ApiState {
    /// Upstream provider client
    pub client: SafClient<Transport>,
    /// Settings echoed by `/config`
    pub public_config: PublicConfig,
}

impl ApiState {
    pub fn new(client: SafClient<Transport>, public_config: PublicConfig) -> Self {
        Self {
            client,
            public_config,
        }
    }
}

pub type SharedState = Arc<ApiState>;

/// Log a provider failure and lift it into the boundary error
pub(crate) fn upstream(operation: &str, err: ClientError) -> ApiError {
    match &err {
        ClientError::Authentication(_) => tracing::warn!("{} rejected: {}", operation, err),
        _ => tracing::error!("{} failed: {}", operation, err),
    }
    ApiError::Client(err)
}

/// Service banner
#[debug_handler]
pub async fn root() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: SERVICE_NAME,
        version: SERVICE_VERSION,
        description: SERVICE_DESCRIPTION,
        health: "/health",
    })
}

/// Health check endpoint
#[debug_handler]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: SERVICE_VERSION,
        timestamp: Utc::now(),
    })
}

/// Current non-secret configuration
#[debug_handler]
pub async fn get_config(State(state): State<SharedState>) -> Json<ApiResponse<PublicConfig>> {
    Json(ApiResponse::ok(state.public_config.clone()))
}
