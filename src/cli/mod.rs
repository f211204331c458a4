//! CLI module
//!
//! Provides:
//! - Flag parsing
//! - Layered settings (defaults, TOML file, environment)
//! - Tracing subscriber setup

pub mod args;
pub mod logging;
pub mod settings;

// Re-exports
pub use args::Args;
pub use logging::init_logging;
pub use settings::Settings;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid setting: {0}")]
    InvalidSetting(String),

    #[error("Logging setup failed: {0}")]
    Logging(String),
}

pub type Result<T> = std::result::Result<T, Error>;
