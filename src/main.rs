//! SAF Gateway server
//!
//! Loads settings, installs logging and serves the HTTP API until ctrl-c.

use anyhow::Context;
use clap::Parser;
use tracing::info;

use safgate::{init_logging, Args, Settings};
use safgate_api::{ApiServer, ApiState};
use safgate_client::SafClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    settings.apply_args(&args);

    init_logging(settings.effective_log_level(), settings.log_json)?;

    info!(
        "SAF provider at {} (login port {}, api port {})",
        settings.saf_base_url, settings.saf_login_port, settings.saf_api_port
    );
    if !settings.has_credentials() {
        info!("No service credentials configured; login-with-config is disabled");
    }

    let client = SafClient::connect(settings.client_config()).context("building SAF client")?;
    let state = ApiState::new(client, settings.public_config());

    ApiServer::new(settings.api_config(), state).start().await
}
