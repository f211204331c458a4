//! Known-issue list reshaping

use serde::Serialize;
use serde_json::Value;

use crate::fields::Fields;

/// A known issue in response form. Text fields default to `""` and
/// `is_enable` to `true`. Identifiers keep whatever JSON type the provider
/// sent them as.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnownIssue {
    pub id: Value,
    pub project_id: Value,
    pub project_name: String,
    pub root_id: Value,
    pub test_item_name: String,
    pub issue_id: String,
    pub case_name: String,
    pub case_path: String,
    pub created_by: String,
    pub created_at: String,
    pub jira_id: String,
    pub note: String,
    pub is_enable: bool,
    pub jira_link: String,
}

impl KnownIssue {
    pub fn from_record(item: &Value) -> Self {
        let f = Fields::of(item);
        Self {
            id: f.scalar_or("id", ""),
            project_id: f.scalar_or("projectId", ""),
            project_name: f.str_or("projectName", ""),
            root_id: f.scalar_or("rootId", ""),
            test_item_name: f.str_or("testItemName", ""),
            issue_id: f.str_or("issueId", ""),
            case_name: f.str_or("caseName", ""),
            case_path: f.str_or("casePath", ""),
            created_by: f.str_or("createdBy", ""),
            created_at: f.str_or("createdAt", ""),
            jira_id: f.str_or("jiraId", ""),
            note: f.str_or("note", ""),
            is_enable: f.bool_or("isEnable", true),
            jira_link: f.str_or("jiraLink", ""),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KnownIssueList {
    pub items: Vec<KnownIssue>,
    pub total: usize,
}

/// Reshape the provider's `{items: [...]}` document
pub fn build_known_issue_list(raw: &Value) -> KnownIssueList {
    let items: Vec<KnownIssue> = Fields::of(raw)
        .list("items")
        .iter()
        .map(KnownIssue::from_record)
        .collect();

    KnownIssueList {
        total: items.len(),
        items,
    }
}
