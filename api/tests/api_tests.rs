//! API Boundary Tests
//!
//! Drives the router with `tower::ServiceExt::oneshot` over a fake
//! provider transport:
//! - Service endpoints and the public config
//! - Actor header validation
//! - Reshaped project endpoints
//! - Provider failures mapped to status codes

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use safgate_api::{build_router, ApiState, PublicConfig};
use safgate_client::{
    ClientConfig, Credentials, FakeTransport, RequestBody, RetryPolicy, SafClient, Transport,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

const LOGIN_URL: &str = "http://saf.test:8000/api/login";
const API_BASE: &str = "http://saf.test:3004/api";

fn fast_retry() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 3,
        initial_delay: Duration::from_millis(1),
        backoff: 2.0,
    }
}

fn public_config() -> PublicConfig {
    PublicConfig {
        saf_base_url: "http://saf.test".to_string(),
        saf_login_port: 8000,
        saf_api_port: 3004,
        api_host: "127.0.0.1".to_string(),
        api_port: 8080,
        debug: false,
        log_level: "info".to_string(),
        has_credentials: false,
    }
}

fn state_with(transport: FakeTransport, credentials: Option<Credentials>) -> Arc<ApiState> {
    let config = ClientConfig::new(LOGIN_URL, API_BASE)
        .with_retry(fast_retry())
        .with_credentials(credentials);
    let client = SafClient::new(Transport::Fake(transport), config);
    Arc::new(ApiState::new(client, public_config()))
}

fn app(transport: FakeTransport) -> Router {
    build_router(state_with(transport, None))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("Authorization", "150")
        .header("Authorization-Name", "test_user")
        .body(Body::empty())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn send_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let (status, body) = send(app, request).await;
    (status, serde_json::from_str(&body).unwrap())
}

fn summary_document() -> String {
    json!({
        "projectId": "proj-001",
        "projectName": "Springsteen",
        "fws": [{
            "projectUid": "abc123",
            "fwName": "FW_A",
            "subVersionName": "AA",
            "internalSummary_1": {
                "totalTestItems": 100,
                "passedCnt": 80,
                "failedCnt": 10,
                "conditionalPassedCnt": 5
            },
            "plans": [{
                "categoryItems": [{
                    "categoryName": "Compatibility",
                    "sizeResult": [
                        {"size": "1024GB", "result": "10/2/0/0/0"},
                        {"size": "512GB", "result": "8/0/0/0/0"}
                    ]
                }]
            }]
        }]
    })
    .to_string()
}

// ============================================================================
// Service endpoints
// ============================================================================

#[tokio::test]
async fn test_health_is_not_enveloped() {
    let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
    let (status, body) = send_json(app(FakeTransport::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body.get("success").is_none());
}

#[tokio::test]
async fn test_root_banner() {
    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let (status, body) = send_json(app(FakeTransport::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "SAF Gateway");
    assert_eq!(body["health"], "/health");
}

#[tokio::test]
async fn test_config_reports_public_settings() {
    let request = Request::builder().uri("/config").body(Body::empty()).unwrap();
    let (status, body) = send_json(app(FakeTransport::new()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["saf_api_port"], 3004);
    assert_eq!(body["data"]["has_credentials"], false);
}

// ============================================================================
// Actor headers
// ============================================================================

#[tokio::test]
async fn test_missing_auth_headers() {
    let request = Request::builder()
        .uri("/api/v1/projects")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(app(FakeTransport::new()), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error_code"], "MISSING_AUTH");
}

#[tokio::test]
async fn test_non_numeric_user_id() {
    let request = Request::builder()
        .uri("/api/v1/projects")
        .header("Authorization", "abc")
        .header("Authorization-Name", "test_user")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send_json(app(FakeTransport::new()), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error_code"], "INVALID_AUTH");
}

#[tokio::test]
async fn test_actor_forwarded_to_provider() {
    let state = state_with(
        FakeTransport::new().with_route("/project/getFwsByProjectId", 200, r#"{"fws": []}"#),
        None,
    );
    let (status, _) = send(
        build_router(state.clone()),
        get("/api/v1/projects/42/firmwares"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let Transport::Fake(fake) = state.client.transport() else {
        panic!("expected fake transport");
    };
    let requests = fake.requests();
    assert_eq!(requests[0].header("Authorization"), Some("150"));
    assert_eq!(requests[0].header("Authorization_name"), Some("test_user"));
    match &requests[0].body {
        RequestBody::Json(body) => assert_eq!(body["projectId"], "42"),
        other => panic!("expected json body, got {other:?}"),
    }
}

// ============================================================================
// Projects
// ============================================================================

#[tokio::test]
async fn test_page_size_limit() {
    let (status, body) = send_json(
        app(FakeTransport::new()),
        get("/api/v1/projects?page=1&size=101"),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error_code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_flatten_replaces_data() {
    let page = json!({
        "page": 1, "size": 50, "total": 1,
        "data": [{
            "key": "def456", "projectUid": "def456", "projectName": "Channel",
            "projectId": 7, "customer": null,
            "children": [{"key": "def456-child", "projectUid": "def456-child"}]
        }]
    });
    let transport = FakeTransport::new().with_route(
        "/project/listAllProjectsDetails",
        200,
        &page.to_string(),
    );

    let (status, body) = send_json(app(transport), get("/api/v1/projects?flatten=true")).await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"]["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[1]["key"], "def456-child");
    assert!(data[0].get("children").is_none());
    assert_eq!(data[0]["projectId"], 7);
    assert_eq!(data[0]["customer"], Value::Null);
    assert!(data[1].get("projectName").is_none());
    assert_eq!(body["data"]["total"], 1);
}

#[tokio::test]
async fn test_projects_summary_order() {
    let page = json!({
        "total": 3,
        "data": [
            {"customer": "ACME", "controller": "SM2264"},
            {"customer": "SSK", "controller": "SM2508"},
            {"customer": "SSK", "controller": "SM2508"}
        ]
    });
    let transport = FakeTransport::new().with_route(
        "/project/listAllProjectsDetails",
        200,
        &page.to_string(),
    );

    let (status, body) = send(app(transport), get("/api/v1/projects/summary")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(r#""by_customer":{"SSK":2,"ACME":1}"#), "{body}");
}

#[tokio::test]
async fn test_test_summary_reshaped() {
    let transport = FakeTransport::new().with_route(
        "/project/getProjectTestSummary",
        200,
        &summary_document(),
    );

    let (status, body) = send_json(app(transport), get("/api/v1/projects/abc123/test-summary")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["capacities"], json!(["512GB", "1024GB"]));
    assert_eq!(body["data"]["summary"]["total_pass"], 18);
    assert_eq!(body["data"]["summary"]["overall_pass_rate"], 90.0);
}

#[tokio::test]
async fn test_full_summary_reshaped() {
    let transport = FakeTransport::new().with_route(
        "/project/getProjectTestSummary",
        200,
        &summary_document(),
    );

    let (status, body) = send_json(app(transport), get("/api/v1/projects/abc123/full-summary")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_firmwares"], 1);
    assert_eq!(body["data"]["aggregated_stats"]["overall_pass_rate"], 88.89);
}

#[tokio::test]
async fn test_known_issues_filter_forwarded() {
    let issues = json!({"items": [{"id": "1", "testItemName": "Boot", "isEnable": false}]});
    let state = state_with(
        FakeTransport::new().with_route("/knownIssue/listKnownIssues", 200, &issues.to_string()),
        None,
    );
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/projects/known-issues?project_id=p1&project_id=p2&root_id=r1")
        .header("Authorization", "150")
        .header("Authorization-Name", "test_user")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_json(build_router(state.clone()), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total"], 1);
    assert_eq!(body["data"]["items"][0]["test_item_name"], "Boot");
    assert_eq!(body["data"]["items"][0]["is_enable"], false);

    let Transport::Fake(fake) = state.client.transport() else {
        panic!("expected fake transport");
    };
    match &fake.requests()[0].body {
        RequestBody::Json(body) => {
            assert_eq!(body["projectId"], json!(["p1", "p2"]));
            assert_eq!(body["rootId"], json!(["r1"]));
            assert_eq!(body["showDisable"], true);
        }
        other => panic!("expected json body, got {other:?}"),
    }
}

// ============================================================================
// Provider failures
// ============================================================================

#[tokio::test]
async fn test_unknown_project() {
    let transport = FakeTransport::new().with_route("/project/getProjectDashboard", 404, "{}");

    let (status, body) = send_json(app(transport), get("/api/v1/projects/999/dashboard")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "PROJECT_NOT_FOUND");
    assert_eq!(body["message"], "Project not found: 999");
}

#[tokio::test]
async fn test_provider_unreachable() {
    let (status, body) = send_json(
        app(FakeTransport::unreachable()),
        get("/api/v1/projects/abc123/test-details"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error_code"], "CONNECTION_ERROR");
    assert_eq!(body["message"], "Unable to connect to SAF server");
}

#[tokio::test]
async fn test_provider_server_error() {
    let transport = FakeTransport::new().with_route("/project/getProjectTestSummary", 500, "{}");

    let (status, body) = send_json(
        app(transport),
        get("/api/v1/projects/abc123/firmware-summary"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_code"], "SAF_API_ERROR");
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn test_login_rejected() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login")
        .header("Content-Type", "application/json")
        .body(Body::from(r#"{"username": "u", "password": "wrong"}"#))
        .unwrap();

    let transport = FakeTransport::new().with_route("/api/login", 401, "{}");
    let (status, body) = send_json(app(transport), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "AUTH_FAILED");
    assert_eq!(body["message"], "Invalid username or password");
}

#[tokio::test]
async fn test_login_with_config() {
    let transport = FakeTransport::new().with_route(
        "/api/login",
        200,
        r#"{"id": 150, "name": "svc", "mail": "svc@example.com"}"#,
    );
    let state = state_with(transport, Credentials::from_parts(Some("svc"), Some("pw")));
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login-with-config")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_json(build_router(state), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 150);
    assert_eq!(body["data"]["name"], "svc");
}

#[tokio::test]
async fn test_login_with_config_without_credentials() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/auth/login-with-config")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send_json(app(FakeTransport::new()), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error_code"], "AUTH_FAILED");
}
