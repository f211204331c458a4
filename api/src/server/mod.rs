//! API Server Module
//!
//! Route table and server lifecycle.

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::handlers::{
    full_summary, get_config, health_check, known_issues, list_projects, login, login_with_config,
    project_dashboard, project_firmware_summary, project_firmwares, project_test_details,
    project_test_summary, projects_summary, root, ApiState, SharedState,
};
use crate::models::ApiConfig;

/// Build the application router over shared state.
///
/// Every project route shares the `:id` segment name; it carries either
/// the numeric project id or the project uid depending on the endpoint.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/config", get(get_config))
        // Auth
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/login-with-config", post(login_with_config))
        // Projects
        .route("/api/v1/projects", get(list_projects))
        .route("/api/v1/projects/summary", get(projects_summary))
        .route("/api/v1/projects/known-issues", post(known_issues))
        .route("/api/v1/projects/:id/firmwares", get(project_firmwares))
        .route(
            "/api/v1/projects/:id/firmware-summary",
            get(project_firmware_summary),
        )
        .route("/api/v1/projects/:id/test-summary", get(project_test_summary))
        .route("/api/v1/projects/:id/full-summary", get(full_summary))
        .route("/api/v1/projects/:id/test-details", get(project_test_details))
        .route("/api/v1/projects/:id/dashboard", get(project_dashboard))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Main API server
pub struct ApiServer {
    /// Server configuration
    config: ApiConfig,
    /// Shared state
    state: SharedState,
}

impl ApiServer {
    pub fn new(config: ApiConfig, state: ApiState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    pub fn router(&self) -> Router {
        build_router(self.state.clone())
    }

    /// Serve until ctrl-c
    pub async fn start(&self) -> Result<()> {
        let addr = format!("{}:{}", self.config.host, self.config.port);
        info!("Starting SAF Gateway API server on {}", addr);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to bind {}: {}", addr, e))?;
        info!("SAF Gateway API server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| anyhow::anyhow!("Failed to start API server: {}", e))?;

        info!("SAF Gateway API server stopped");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
