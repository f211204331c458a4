//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Backend-for-frontend over the SAF test-management system
#[derive(Debug, Clone, Parser)]
#[command(name = "safgate", version, about)]
pub struct Args {
    /// TOML settings file (defaults to ./safgate.toml when present)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Bind address, overrides `api_host`
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port, overrides `api_port`
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Log filter, overrides `log_level`
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Emit JSON log lines
    #[arg(long)]
    pub log_json: bool,
}
