//! API Models
//!
//! Request and response types for the HTTP boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server bind configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Envelope around every JSON body except `/health` and `/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            timestamp: Utc::now(),
            error_code: None,
        }
    }

    pub fn error(message: impl Into<String>, error_code: &str) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            timestamp: Utc::now(),
            error_code: Some(error_code.to_string()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `GET /` body
#[derive(Debug, Clone, Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    pub health: &'static str,
}

/// `GET /health` body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: DateTime<Utc>,
}

/// Non-secret settings exposed by `GET /config`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublicConfig {
    pub saf_base_url: String,
    pub saf_login_port: u16,
    pub saf_api_port: u16,
    pub api_host: String,
    pub api_port: u16,
    pub debug: bool,
    pub log_level: String,
    pub has_credentials: bool,
}

/// Query for `GET /api/v1/projects`
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListQuery {
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_size")]
    pub size: u32,
    #[serde(default)]
    pub flatten: bool,
}

fn default_page() -> u32 {
    1
}

fn default_size() -> u32 {
    50
}

pub const MAX_PAGE_SIZE: u32 = 100;

impl ProjectListQuery {
    /// Page starts at 1; size is 1..=100
    pub fn validate(&self) -> Result<(), String> {
        if self.page < 1 {
            return Err("page must be at least 1".to_string());
        }
        if !(1..=MAX_PAGE_SIZE).contains(&self.size) {
            return Err(format!("size must be between 1 and {}", MAX_PAGE_SIZE));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::<()>::error("nope", "SAF_API_ERROR")).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["data"], serde_json::Value::Null);
        assert_eq!(body["error_code"], "SAF_API_ERROR");
        assert!(body["timestamp"].is_string());
    }

    #[test]
    fn test_success_envelope_omits_error_code() {
        let body = serde_json::to_value(ApiResponse::ok(1)).unwrap();
        assert!(body.get("error_code").is_none());
        assert_eq!(body["message"], serde_json::Value::Null);
    }

    #[test]
    fn test_page_query_bounds() {
        let query = |page, size| ProjectListQuery {
            page,
            size,
            flatten: false,
        };
        assert!(query(1, 50).validate().is_ok());
        assert!(query(1, 100).validate().is_ok());
        assert!(query(0, 50).validate().is_err());
        assert!(query(1, 0).validate().is_err());
        assert!(query(1, 101).validate().is_err());
    }
}
