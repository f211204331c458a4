//! SAF provider client
//!
//! Every data call is a JSON POST carrying the caller's actor identity in
//! the `Authorization` / `Authorization_name` headers. Login is a form POST
//! to a separate port. All calls go through the configured [`RetryPolicy`].

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::ClientError;
use crate::retry::RetryPolicy;
use crate::transport::{HttpTransport, ReqwestTransport, RequestBody, Transport, TransportResponse};

/// Username/password pair for service-level login
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    /// Both parts present and non-empty
    pub fn from_parts(username: Option<&str>, password: Option<&str>) -> Option<Self> {
        match (username, password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => Some(Self {
                username: u.to_string(),
                password: p.to_string(),
            }),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Caller identity forwarded to the provider on every data call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: i64,
    pub name: String,
}

impl Actor {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub mail: String,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Full login URL, e.g. `https://saf:8000/api/login`
    pub login_url: String,
    /// Data API base, e.g. `https://saf:3004/api`
    pub api_base_url: String,
    pub timeout: Duration,
    pub retry: RetryPolicy,
    pub credentials: Option<Credentials>,
}

impl ClientConfig {
    pub fn new(login_url: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self {
            login_url: login_url.into(),
            api_base_url: api_base_url.into(),
            timeout: Duration::from_secs(crate::transport_reqwest::DEFAULT_TIMEOUT_SECS),
            retry: RetryPolicy::default(),
            credentials: None,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }
}

/// Provider client over any [`HttpTransport`]
#[derive(Debug)]
pub struct SafClient<T = Transport> {
    transport: T,
    config: ClientConfig,
}

impl SafClient<Transport> {
    /// Client over a real reqwest transport using the configured timeout
    pub fn connect(config: ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::with_timeout(config.timeout)?;
        Ok(Self::new(Transport::Real(transport), config))
    }
}

impl<T: HttpTransport> SafClient<T> {
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one request under the retry policy
    async fn send(
        &self,
        operation: &str,
        url: &str,
        headers: Vec<(&'static str, String)>,
        body: RequestBody,
    ) -> Result<TransportResponse, ClientError> {
        let transport = &self.transport;
        let headers = headers.as_slice();

        self.config
            .retry
            .run(operation, move || transport.post(url, headers, body.clone()))
            .await
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let url = self.config.login_url.as_str();
        debug!("Logging in to SAF: {}", url);

        let form = vec![
            ("username".to_string(), username.to_string()),
            ("password".to_string(), password.to_string()),
        ];
        let response = self
            .send("login", url, Vec::new(), RequestBody::Form(form))
            .await?;

        if response.is_success() {
            let login: LoginResponse = serde_json::from_str(&response.body)?;
            info!("Login successful for user: {}", login.name);
            return Ok(login);
        }

        if response.status == 401 {
            return Err(ClientError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        Err(ClientError::api(
            response.status,
            format!("Login failed with status code: {}", response.status),
        ))
    }

    /// Log in with the service credentials from configuration
    pub async fn login_with_config(&self) -> Result<LoginResponse, ClientError> {
        let credentials = self.config.credentials.as_ref().ok_or_else(|| {
            ClientError::Authentication(
                "SAF credentials not configured. Set SAF_USERNAME and SAF_PASSWORD.".to_string(),
            )
        })?;
        self.login(&credentials.username, &credentials.password).await
    }

    fn actor_headers(actor: &Actor) -> Vec<(&'static str, String)> {
        vec![
            ("Authorization", actor.id.to_string()),
            ("Authorization_name", actor.name.clone()),
            ("Accept", "application/json".to_string()),
            ("Content-Type", "application/json".to_string()),
        ]
    }

    /// JSON POST to `{api_base}{path}`. A 404 becomes `ProjectNotFound`
    /// when `project` names the requested id.
    async fn post_api(
        &self,
        operation: &str,
        actor: &Actor,
        path: &str,
        body: Value,
        project: Option<&str>,
    ) -> Result<Value, ClientError> {
        let url = format!("{}{}", self.config.api_base_url, path);
        debug!("{}: POST {}", operation, url);

        let response = self
            .send(operation, &url, Self::actor_headers(actor), RequestBody::Json(body))
            .await?;

        match (response.status, project) {
            (status, _) if (200..300).contains(&status) => response.json(),
            (404, Some(id)) => Err(ClientError::project_not_found(id)),
            (status, _) => Err(ClientError::api(
                status,
                format!("{} failed with status code: {}", operation, status),
            )),
        }
    }

    #[instrument(skip(self), fields(actor = actor.id))]
    pub async fn list_all_projects(
        &self,
        actor: &Actor,
        page: u32,
        size: u32,
    ) -> Result<Value, ClientError> {
        let result = self
            .post_api(
                "list_all_projects",
                actor,
                "/project/listAllProjectsDetails",
                json!({"page": page, "size": size}),
                None,
            )
            .await?;

        let total = result.get("total").and_then(Value::as_u64).unwrap_or(0);
        info!("Retrieved {} projects", total);
        Ok(result)
    }

    #[instrument(skip(self), fields(actor = actor.id))]
    pub async fn list_firmwares_by_project_id(
        &self,
        actor: &Actor,
        project_id: &str,
    ) -> Result<Value, ClientError> {
        self.post_api(
            "list_firmwares_by_project_id",
            actor,
            "/project/getFwsByProjectId",
            json!({"projectId": project_id}),
            Some(project_id),
        )
        .await
    }

    #[instrument(skip(self), fields(actor = actor.id))]
    pub async fn get_project_summary(
        &self,
        actor: &Actor,
        project_uid: &str,
    ) -> Result<Value, ClientError> {
        self.post_api(
            "get_project_summary",
            actor,
            "/project/getProjectTestSummary",
            json!({"projectUid": project_uid}),
            Some(project_uid),
        )
        .await
    }

    #[instrument(skip(self), fields(actor = actor.id))]
    pub async fn get_project_dashboard(
        &self,
        actor: &Actor,
        project_id: &str,
    ) -> Result<Value, ClientError> {
        self.post_api(
            "get_project_dashboard",
            actor,
            "/project/getProjectDashboard",
            json!({"projectId": project_id}),
            Some(project_id),
        )
        .await
    }

    #[instrument(skip(self), fields(actor = actor.id))]
    pub async fn list_known_issues(
        &self,
        actor: &Actor,
        project_ids: &[String],
        root_ids: &[String],
        show_disabled: bool,
    ) -> Result<Value, ClientError> {
        self.post_api(
            "list_known_issues",
            actor,
            "/knownIssue/listKnownIssues",
            json!({
                "projectId": project_ids,
                "rootId": root_ids,
                "showDisable": show_disabled,
            }),
            None,
        )
        .await
    }
}
