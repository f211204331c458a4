//! Login endpoints and the actor-header extractor

use axum::{
    async_trait, debug_handler,
    extract::{FromRequestParts, State},
    http::request::Parts,
    response::Json,
};
use safgate_client::{Actor, LoginResponse};

use super::{upstream, SharedState};
use crate::error::ApiError;
use crate::models::{ApiResponse, LoginRequest};

const AUTHORIZATION: &str = "authorization";
const AUTHORIZATION_NAME: &str = "authorization-name";

/// Caller identity from `Authorization` (numeric user id) and
/// `Authorization-Name`. Passed through to the provider unverified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthInfo {
    pub user_id: i64,
    pub username: String,
}

impl AuthInfo {
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id, self.username.clone())
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AuthInfo {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let (Some(id), Some(name)) = (header(AUTHORIZATION), header(AUTHORIZATION_NAME)) else {
            return Err(ApiError::MissingAuth);
        };

        let user_id = id.parse::<i64>().map_err(|_| ApiError::InvalidAuth)?;

        Ok(AuthInfo {
            user_id,
            username: name.to_string(),
        })
    }
}

/// Log in with caller-supplied credentials
#[debug_handler]
pub async fn login(
    State(state): State<SharedState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    tracing::debug!("Login request for user: {}", request.username);

    let login = state
        .client
        .login(&request.username, &request.password)
        .await
        .map_err(|e| upstream("login", e))?;

    Ok(Json(ApiResponse::ok(login)))
}

/// Log in with the service credentials from settings
#[debug_handler]
pub async fn login_with_config(
    State(state): State<SharedState>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let login = state
        .client
        .login_with_config()
        .await
        .map_err(|e| upstream("login_with_config", e))?;

    Ok(Json(ApiResponse::ok(login)))
}
