//! Boundary errors and their HTTP mapping

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use safgate_client::{ApiErrorCode, ClientError};

use crate::models::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Missing authorization headers. Please provide 'Authorization' (user ID) and 'Authorization-Name' (username).")]
    MissingAuth,

    #[error("Invalid Authorization header. User ID must be an integer.")]
    InvalidAuth,

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        self.classify().0
    }

    pub fn error_code(&self) -> &'static str {
        self.classify().1
    }

    fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::MissingAuth => (StatusCode::UNAUTHORIZED, "MISSING_AUTH"),
            ApiError::InvalidAuth => (StatusCode::BAD_REQUEST, "INVALID_AUTH"),
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_ERROR"),
            ApiError::Client(err) => match err {
                ClientError::Authentication(_) => (StatusCode::UNAUTHORIZED, "AUTH_FAILED"),
                ClientError::Connection(_) | ClientError::Timeout(_) => {
                    (StatusCode::SERVICE_UNAVAILABLE, "CONNECTION_ERROR")
                }
                ClientError::Api {
                    code: ApiErrorCode::ProjectNotFound,
                    ..
                } => (StatusCode::NOT_FOUND, ApiErrorCode::ProjectNotFound.as_str()),
                ClientError::Api { .. } | ClientError::InvalidResponse(_) => {
                    (StatusCode::BAD_GATEWAY, ApiErrorCode::SafApiError.as_str())
                }
                ClientError::Configuration(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
                }
            },
        }
    }

    /// Message shown to the caller. Connection details stay in the logs.
    fn public_message(&self) -> String {
        match self {
            ApiError::Client(ClientError::Connection(_) | ClientError::Timeout(_)) => {
                "Unable to connect to SAF server".to_string()
            }
            ApiError::Client(ClientError::Authentication(message)) => message.clone(),
            ApiError::Client(ClientError::Api { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.classify();
        let body = ApiResponse::<()>::error(self.public_message(), code);
        (status, Json(body)).into_response()
    }
}
