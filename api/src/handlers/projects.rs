//! Project endpoints
//!
//! Each handler fetches one provider document for the calling actor and
//! either passes it through or reshapes it with `safgate-core`.

use axum::{
    debug_handler,
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Json,
};
use safgate_core::{
    build_dashboard, build_firmware_summary, build_full_summary, build_known_issue_list,
    build_test_details, build_test_summary, flatten_projects, Fields, FirmwareSummary,
    FullProjectSummary, KnownIssueList, ProjectCounts, ProjectDashboard, ProjectPage,
    ProjectTestSummary, TestDetailsResponse,
};
use serde_json::Value;

use super::{upstream, AuthInfo, SharedState};
use crate::error::ApiError;
use crate::models::{ApiResponse, ProjectListQuery};

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// Page size used when counting every project
const SUMMARY_PAGE_SIZE: u32 = 1000;

/// Paged project listing; `flatten=true` replaces `data` with the
/// pre-order flattened tree.
#[debug_handler]
pub async fn list_projects(
    State(state): State<SharedState>,
    auth: AuthInfo,
    query: Result<Query<ProjectListQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    query.validate().map_err(ApiError::Validation)?;

    tracing::debug!(
        "Listing projects page={} size={} flatten={}",
        query.page,
        query.size,
        query.flatten
    );

    let mut result = state
        .client
        .list_all_projects(&auth.actor(), query.page, query.size)
        .await
        .map_err(|e| upstream("list_all_projects", e))?;

    if query.flatten {
        let flat = flatten_projects(Fields::of(&result).list("data"));
        if let Some(obj) = result.as_object_mut() {
            obj.insert("data".to_string(), Value::Array(flat));
        }
    }

    Ok(Json(ApiResponse::ok(result)))
}

/// Project counts by customer and by controller across the whole tree
#[debug_handler]
pub async fn projects_summary(
    State(state): State<SharedState>,
    auth: AuthInfo,
) -> ApiResult<ProjectCounts> {
    let result = state
        .client
        .list_all_projects(&auth.actor(), 1, SUMMARY_PAGE_SIZE)
        .await
        .map_err(|e| upstream("list_all_projects", e))?;

    let counts = ProjectCounts::tally(&ProjectPage::from_value(&result));
    Ok(Json(ApiResponse::ok(counts)))
}

/// Raw firmware list for a project id
#[debug_handler]
pub async fn project_firmwares(
    State(state): State<SharedState>,
    auth: AuthInfo,
    Path(project_id): Path<String>,
) -> ApiResult<Value> {
    tracing::debug!("Getting firmwares for project: {}", project_id);

    let fws = state
        .client
        .list_firmwares_by_project_id(&auth.actor(), &project_id)
        .await
        .map_err(|e| upstream("list_firmwares_by_project_id", e))?;

    Ok(Json(ApiResponse::ok(fws)))
}

async fn fetch_summary(
    state: &SharedState,
    auth: &AuthInfo,
    project_uid: &str,
) -> Result<Value, ApiError> {
    tracing::debug!("Getting test summary document for project: {}", project_uid);
    state
        .client
        .get_project_summary(&auth.actor(), project_uid)
        .await
        .map_err(|e| upstream("get_project_summary", e))
}

/// First-firmware summary
#[debug_handler]
pub async fn project_firmware_summary(
    State(state): State<SharedState>,
    auth: AuthInfo,
    Path(project_uid): Path<String>,
) -> ApiResult<FirmwareSummary> {
    let raw = fetch_summary(&state, &auth, &project_uid).await?;
    Ok(Json(ApiResponse::ok(build_firmware_summary(&raw))))
}

/// Category roll-up by capacity
#[debug_handler]
pub async fn project_test_summary(
    State(state): State<SharedState>,
    auth: AuthInfo,
    Path(project_uid): Path<String>,
) -> ApiResult<ProjectTestSummary> {
    let raw = fetch_summary(&state, &auth, &project_uid).await?;
    Ok(Json(ApiResponse::ok(build_test_summary(&raw))))
}

/// Every firmware plus the cross-firmware aggregate
#[debug_handler]
pub async fn full_summary(
    State(state): State<SharedState>,
    auth: AuthInfo,
    Path(project_uid): Path<String>,
) -> ApiResult<FullProjectSummary> {
    let raw = fetch_summary(&state, &auth, &project_uid).await?;
    Ok(Json(ApiResponse::ok(build_full_summary(&raw))))
}

/// Per-test-item details
#[debug_handler]
pub async fn project_test_details(
    State(state): State<SharedState>,
    auth: AuthInfo,
    Path(project_uid): Path<String>,
) -> ApiResult<TestDetailsResponse> {
    let raw = fetch_summary(&state, &auth, &project_uid).await?;
    Ok(Json(ApiResponse::ok(build_test_details(&raw))))
}

#[debug_handler]
pub async fn project_dashboard(
    State(state): State<SharedState>,
    auth: AuthInfo,
    Path(project_id): Path<String>,
) -> ApiResult<ProjectDashboard> {
    tracing::debug!("Getting dashboard for project: {}", project_id);

    let raw = state
        .client
        .get_project_dashboard(&auth.actor(), &project_id)
        .await
        .map_err(|e| upstream("get_project_dashboard", e))?;

    Ok(Json(ApiResponse::ok(build_dashboard(&raw))))
}

/// Filters for the known-issue listing. `project_id` and `root_id` repeat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnownIssueFilter {
    pub project_ids: Vec<String>,
    pub root_ids: Vec<String>,
    pub show_disabled: bool,
}

impl KnownIssueFilter {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Result<Self, ApiError> {
        let mut filter = KnownIssueFilter {
            project_ids: Vec::new(),
            root_ids: Vec::new(),
            show_disabled: true,
        };

        for (key, value) in pairs {
            match key.as_str() {
                "project_id" => filter.project_ids.push(value),
                "root_id" => filter.root_ids.push(value),
                "show_disable" => {
                    filter.show_disabled = parse_flag(&value).ok_or_else(|| {
                        ApiError::Validation(format!(
                            "show_disable must be a boolean, got '{}'",
                            value
                        ))
                    })?;
                }
                _ => {}
            }
        }

        Ok(filter)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[debug_handler]
pub async fn known_issues(
    State(state): State<SharedState>,
    auth: AuthInfo,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResult<KnownIssueList> {
    let Query(pairs) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let filter = KnownIssueFilter::from_pairs(pairs)?;

    tracing::debug!(
        "Listing known issues projects={:?} roots={:?} show_disable={}",
        filter.project_ids,
        filter.root_ids,
        filter.show_disabled
    );

    let raw = state
        .client
        .list_known_issues(
            &auth.actor(),
            &filter.project_ids,
            &filter.root_ids,
            filter.show_disabled,
        )
        .await
        .map_err(|e| upstream("list_known_issues", e))?;

    Ok(Json(ApiResponse::ok(build_known_issue_list(&raw))))
}
