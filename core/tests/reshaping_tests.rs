//! Reshaping Scenario Tests
//!
//! End-to-end checks of the summary builders against provider-shaped
//! documents:
//! - Category roll-up over two plans
//! - Cross-firmware aggregation
//! - Project tree flattening and grouped counts
//! - Empty documents never fail

use safgate_core::{
    build_dashboard, build_firmware_summary, build_full_summary, build_known_issue_list,
    build_test_details, build_test_summary, flatten_projects, CapacityLabel, ProjectCounts,
    ProjectPage,
};
use serde_json::{json, Value};

fn category_document() -> Value {
    json!({
        "projectId": "proj-001",
        "projectName": "Springsteen",
        "fws": [{
            "projectUid": "abc123",
            "fwName": "FW_A",
            "plans": [
                {
                    "testPlanName": "Plan 1",
                    "categoryItems": [
                        {
                            "categoryName": "Compatibility",
                            "sizeResult": [
                                {"size": "512GB", "result": "8/0/0/0/0"},
                                {"size": "1024GB", "result": "10/2/0/0/0"}
                            ],
                            "total": "18/2/0/0/0"
                        }
                    ]
                },
                {
                    "testPlanName": "Plan 2",
                    "categoryItems": [
                        {
                            "categoryName": "Function",
                            "sizeResult": [
                                {"size": "512GB", "result": "15/1/0/0/0"},
                                {"size": "1024GB", "result": "20/0/0/0/0"}
                            ],
                            "total": "35/1/0/0/0"
                        }
                    ]
                }
            ]
        }]
    })
}

fn internal_fw(items: u64, passed: u64, failed: u64, cond: u64) -> Value {
    json!({
        "fwName": format!("FW_{items}"),
        "internalSummary_1": {
            "totalTestItems": items,
            "passedCnt": passed,
            "failedCnt": failed,
            "conditionalPassedCnt": cond
        }
    })
}

// ============================================================================
// Category roll-up
// ============================================================================

#[test]
fn test_category_summary_totals() {
    let summary = build_test_summary(&category_document());

    assert_eq!(summary.project_uid, "abc123");
    assert_eq!(summary.project_name, "Springsteen");
    assert_eq!(summary.summary.total_pass, 53);
    assert_eq!(summary.summary.total_fail, 3);
    assert_eq!(summary.summary.overall_total, 56);
    assert_eq!(summary.summary.overall_pass_rate, 94.64);
}

#[test]
fn test_category_summary_structure() {
    let summary = build_test_summary(&category_document());

    assert_eq!(
        summary.capacities,
        vec![CapacityLabel::new("512GB"), CapacityLabel::new("1024GB")]
    );

    let names: Vec<_> = summary.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Compatibility", "Function"]);

    let compat = &summary.categories[0];
    assert_eq!(compat.total.total, 20);
    assert_eq!(compat.total.pass_rate, 90.0);
    let per_capacity = compat.capacity("1024GB").unwrap();
    assert_eq!(per_capacity.counts.fail, 2);
    assert_eq!(per_capacity.pass_rate, 83.33);
}

#[test]
fn test_category_summary_json_shape() {
    let value = serde_json::to_value(build_test_summary(&category_document())).unwrap();

    assert_eq!(value["capacities"], json!(["512GB", "1024GB"]));
    assert_eq!(
        value["categories"][0]["results_by_capacity"]["512GB"],
        json!({
            "pass": 8, "fail": 0, "ongoing": 0, "cancel": 0, "check": 0,
            "total": 8, "pass_rate": 100.0
        })
    );
}

#[test]
fn test_same_named_categories_merge_across_plans() {
    let raw = json!({"fws": [{"plans": [
        {"categoryItems": [{"categoryName": "X", "sizeResult": [{"size": "512GB", "result": "5/0/0/0/0"}]}]},
        {"categoryItems": [{"categoryName": "X", "sizeResult": [{"size": "512GB", "result": "3/2/0/0/0"}]}]}
    ]}]});

    let summary = build_test_summary(&raw);
    assert_eq!(summary.categories.len(), 1);
    assert_eq!(summary.categories[0].total.counts.pass, 8);
    assert_eq!(summary.categories[0].total.counts.fail, 2);
}

// ============================================================================
// Firmware aggregation
// ============================================================================

#[test]
fn test_full_summary_aggregates_every_firmware() {
    let raw = json!({
        "projectId": "proj-001",
        "projectName": "Springsteen",
        "fws": [internal_fw(100, 80, 10, 5), internal_fw(50, 40, 5, 3)]
    });

    let full = build_full_summary(&raw);
    assert_eq!(full.total_firmwares, 2);
    assert_eq!(full.project_id, "proj-001");

    let stats = full.aggregated_stats;
    assert_eq!(stats.total_test_items, 150);
    assert_eq!(stats.total_passed, 120);
    assert_eq!(stats.total_failed, 15);
    assert_eq!(stats.total_conditional_passed, 8);
    assert_eq!(stats.overall_pass_rate, 88.89);
}

#[test]
fn test_firmware_summary_uses_first_firmware_only() {
    let raw = json!({"fws": [internal_fw(100, 80, 10, 5), internal_fw(50, 40, 5, 3)]});

    let summary = build_firmware_summary(&raw);
    assert_eq!(summary.fw_name, "FW_100");
    assert_eq!(summary.overview.total_test_items, 100);
    assert_eq!(summary.overview.pass_rate, 88.89);
}

// ============================================================================
// Project tree
// ============================================================================

#[test]
fn test_flatten_one_child() {
    let page = json!({
        "page": 1, "size": 50, "total": 1,
        "data": [{
            "key": "def456", "projectUid": "def456", "projectName": "Channel",
            "customer": "SSK", "controller": "SM2508", "projectId": 7,
            "children": [{"key": "def456-child", "projectUid": "def456-child",
                          "customer": "SSK", "controller": "SM2508"}]
        }]
    });

    let flat = flatten_projects(page["data"].as_array().unwrap());
    assert_eq!(flat.len(), 2);
    assert_eq!(flat[0]["key"], "def456");
    assert_eq!(flat[0]["projectId"], 7);
    assert_eq!(flat[1]["key"], "def456-child");
    for node in &flat {
        assert!(node.get("children").is_none());
    }
}

#[test]
fn test_grouped_count_sorted_descending() {
    let page = ProjectPage::from_value(&json!({
        "total": 4,
        "data": [
            {"customer": "ACME", "controller": "SM2264"},
            {"customer": "SSK", "controller": "SM2508", "children": [
                {"customer": "SSK", "controller": "SM2508"},
                {"customer": "SSK"}
            ]}
        ]
    }));

    let counts = ProjectCounts::tally(&page);
    let rendered = serde_json::to_string(&counts).unwrap();
    assert_eq!(
        rendered,
        r#"{"total":4,"by_customer":{"SSK":3,"ACME":1},"by_controller":{"SM2508":2,"SM2264":1,"Unknown":1}}"#
    );
}

// ============================================================================
// Counter overflow
// ============================================================================

const MAX: &str = "18446744073709551615";

#[test]
fn test_category_summary_saturates() {
    let raw = json!({"fws": [{"plans": [{"categoryItems": [{
        "categoryName": "X",
        "sizeResult": [
            {"size": "512GB", "result": format!("{MAX}/0/0/0/0")},
            {"size": "1024GB", "result": "1/0/0/0/0"}
        ]
    }]}]}]});

    let summary = build_test_summary(&raw);
    assert_eq!(summary.summary.total_pass, u64::MAX);
    assert_eq!(summary.summary.overall_total, u64::MAX);
    assert_eq!(summary.summary.overall_pass_rate, 100.0);
}

#[test]
fn test_details_summary_saturates() {
    let raw = json!({"fws": [{"details": [
        {"testItemName": "a", "total": format!("0/{MAX}/0/0/0")},
        {"testItemName": "b", "total": "0/1/0/1/0"}
    ]}]});

    let details = build_test_details(&raw);
    assert_eq!(details.summary.total_passed, u64::MAX);
    assert_eq!(details.summary.overall_total, u64::MAX);
    assert_eq!(details.summary.total_failed, 1);
}

#[test]
fn test_full_summary_saturates() {
    let raw = json!({"fws": [
        internal_fw(u64::MAX, u64::MAX, 0, 0),
        internal_fw(1, 1, 1, 0)
    ]});

    let stats = build_full_summary(&raw).aggregated_stats;
    assert_eq!(stats.total_test_items, u64::MAX);
    assert_eq!(stats.total_passed, u64::MAX);
    assert_eq!(stats.overall_pass_rate, 100.0);
}

#[test]
fn test_dashboard_saturates() {
    let fw = |passed: u64| {
        json!({"itemPassedCnt": passed, "itemFailedCnt": 1, "totalItemCnt": passed})
    };
    let raw = json!({"fws": [fw(u64::MAX), fw(5)]});

    let dashboard = build_dashboard(&raw);
    assert_eq!(dashboard.summary.total_passed, u64::MAX);
    assert_eq!(dashboard.summary.overall_total, u64::MAX);
    assert_eq!(dashboard.firmwares[0].completion_rate, 100.0);
}

// ============================================================================
// Empty documents
// ============================================================================

#[test]
fn test_empty_documents_are_zeroed() {
    let empty = json!({"fws": []});

    assert!(build_test_summary(&empty).categories.is_empty());
    assert_eq!(build_test_summary(&empty).summary.overall_pass_rate, 0.0);
    assert_eq!(build_firmware_summary(&empty).overview.pass_rate, 0.0);
    assert_eq!(build_full_summary(&empty).aggregated_stats.overall_pass_rate, 0.0);
    assert!(build_test_details(&empty).details.is_empty());
    assert_eq!(build_dashboard(&empty).summary.overall_pass_rate, 0.0);
    assert_eq!(build_known_issue_list(&empty).total, 0);
}

#[test]
fn test_non_object_documents_do_not_panic() {
    for raw in [json!(null), json!([]), json!("text"), json!({"fws": "nope"})] {
        let _ = build_test_summary(&raw);
        let _ = build_full_summary(&raw);
        let _ = build_test_details(&raw);
        let _ = build_dashboard(&raw);
        let _ = ProjectCounts::tally(&ProjectPage::from_value(&raw));
    }
}
