//! Layered settings
//!
//! Precedence, lowest first: struct defaults, an optional TOML file, then
//! environment variables named after the fields (`SAF_BASE_URL`,
//! `API_PORT`, ...). CLI flags are applied last by [`Settings::apply_args`].

use config::{Config, Environment, File, FileFormat};
use safgate_api::{ApiConfig, PublicConfig};
use safgate_client::{ClientConfig, Credentials, RetryPolicy};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::cli::{Args, Error, Result};

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_SETTINGS_FILE: &str = "safgate.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub saf_base_url: String,
    pub saf_login_port: u16,
    pub saf_api_port: u16,
    pub saf_username: Option<String>,
    pub saf_password: Option<String>,

    pub api_host: String,
    pub api_port: u16,

    pub debug: bool,
    pub log_level: String,
    pub log_json: bool,

    pub request_timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_initial_delay_ms: u64,
    pub retry_backoff: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            saf_base_url: "https://saf.siliconmotion.com.tw".to_string(),
            saf_login_port: 8000,
            saf_api_port: 3004,
            saf_username: None,
            saf_password: None,
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            debug: false,
            log_level: "info".to_string(),
            log_json: false,
            request_timeout_seconds: 30,
            retry_attempts: 3,
            retry_initial_delay_ms: 1000,
            retry_backoff: 2.0,
        }
    }
}

impl Settings {
    /// Load from `path` (required when given) and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with(path, Environment::default())
    }

    /// Load with an explicit environment source
    pub fn load_with(path: Option<&Path>, env: Environment) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_SETTINGS_FILE, FileFormat::Toml).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.saf_base_url.starts_with("http://") || self.saf_base_url.starts_with("https://"))
        {
            return Err(Error::InvalidSetting(format!(
                "saf_base_url must start with http:// or https://, got '{}'",
                self.saf_base_url
            )));
        }
        if self.retry_attempts == 0 {
            return Err(Error::InvalidSetting(
                "retry_attempts must be at least 1".to_string(),
            ));
        }
        if !(self.retry_backoff.is_finite() && self.retry_backoff >= 1.0) {
            return Err(Error::InvalidSetting(format!(
                "retry_backoff must be at least 1.0, got {}",
                self.retry_backoff
            )));
        }
        Ok(())
    }

    /// CLI flags win over every other layer
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(host) = &args.host {
            self.api_host = host.clone();
        }
        if let Some(port) = args.port {
            self.api_port = port;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if args.log_json {
            self.log_json = true;
        }
    }

    fn base_url(&self) -> &str {
        self.saf_base_url.trim_end_matches('/')
    }

    pub fn saf_login_url(&self) -> String {
        format!("{}:{}/api/login", self.base_url(), self.saf_login_port)
    }

    pub fn saf_api_base_url(&self) -> String {
        format!("{}:{}/api", self.base_url(), self.saf_api_port)
    }

    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::from_parts(self.saf_username.as_deref(), self.saf_password.as_deref())
    }

    pub fn has_credentials(&self) -> bool {
        self.credentials().is_some()
    }

    /// `debug` forces the debug level
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "debug"
        } else {
            &self.log_level
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.retry_attempts,
            initial_delay: Duration::from_millis(self.retry_initial_delay_ms),
            backoff: self.retry_backoff,
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new(self.saf_login_url(), self.saf_api_base_url())
            .with_retry(self.retry_policy())
            .with_credentials(self.credentials());
        config.timeout = Duration::from_secs(self.request_timeout_seconds);
        config
    }

    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            host: self.api_host.clone(),
            port: self.api_port,
        }
    }

    pub fn public_config(&self) -> PublicConfig {
        PublicConfig {
            saf_base_url: self.saf_base_url.clone(),
            saf_login_port: self.saf_login_port,
            saf_api_port: self.saf_api_port,
            api_host: self.api_host.clone(),
            api_port: self.api_port,
            debug: self.debug,
            log_level: self.effective_log_level().to_string(),
            has_credentials: self.has_credentials(),
        }
    }
}
