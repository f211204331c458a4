//! Client error taxonomy

/// Provider error codes surfaced on `ClientError::Api`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Generic non-success reply from the provider
    SafApiError,
    /// The requested project id or uid is unknown
    ProjectNotFound,
}

impl ApiErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorCode::SafApiError => "SAF_API_ERROR",
            ApiErrorCode::ProjectNotFound => "PROJECT_NOT_FOUND",
        }
    }
}

/// Errors returned by `SafClient`
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Provider unreachable (connection refused, DNS, reset)
    #[error("Failed to connect to SAF: {0}")]
    Connection(String),

    /// Request did not complete within the configured timeout
    #[error("Connection timeout: {0}")]
    Timeout(String),

    /// Credentials rejected or not configured
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Non-success status after the connection succeeded
    #[error("SAF API error {status}: {message}")]
    Api {
        status: u16,
        code: ApiErrorCode,
        message: String,
    },

    /// Success status with a body that is not the expected JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Client could not be built from its configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ClientError {
    /// Only failures before a reply arrives are worth retrying
    pub fn is_retryable(&self) -> bool {
        matches!(self, ClientError::Connection(_) | ClientError::Timeout(_))
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        ClientError::Api {
            status,
            code: ApiErrorCode::SafApiError,
            message: message.into(),
        }
    }

    pub fn project_not_found(id: &str) -> Self {
        ClientError::Api {
            status: 404,
            code: ApiErrorCode::ProjectNotFound,
            message: format!("Project not found: {}", id),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() {
            ClientError::Connection(err.to_string())
        } else if err.is_builder() {
            ClientError::Configuration(err.to_string())
        } else {
            ClientError::InvalidResponse(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}
