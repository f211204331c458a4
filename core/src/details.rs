//! Per-test-item detail view.
//!
//! Items use the detail counter layout. Project totals are summed from each
//! item's own `total` string, not from its capacity entries.

use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeSet;

use crate::counters::{DetailCounts, DetailResult, OutcomeCounts};
use crate::fields::Fields;
use crate::firmware::FirmwareSelection;
use crate::parsing::CapacityLabel;
use crate::rates::pass_rate;

const UNKNOWN: &str = "Unknown";
const EMPTY_RESULT: &str = "0/0/0/0/0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeResult {
    pub size: String,
    pub result: DetailResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestItemDetail {
    pub category_name: String,
    pub test_item_name: String,
    pub size_results: Vec<SizeResult>,
    pub total: DetailResult,
    pub sample_capacity: String,
    pub note: String,
}

impl TestItemDetail {
    pub fn from_record(item: &Value) -> Self {
        let item = Fields::of(item);

        let size_results = item
            .list("sizeResult")
            .iter()
            .map(|entry| {
                let entry = Fields::of(entry);
                SizeResult {
                    size: entry.str_or("size", UNKNOWN),
                    result: DetailCounts::parse(entry.opt_str("result").unwrap_or(EMPTY_RESULT))
                        .into(),
                }
            })
            .collect();

        Self {
            category_name: item.str_or("categoryName", UNKNOWN),
            test_item_name: item.str_or("testItemName", UNKNOWN),
            size_results,
            total: DetailCounts::parse(item.opt_str("total").unwrap_or(EMPTY_RESULT)).into(),
            sample_capacity: item.str_or("sampleCapacity", ""),
            note: item.str_or("note", ""),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DetailSummary {
    pub total_ongoing: u64,
    pub total_passed: u64,
    pub total_conditional_passed: u64,
    pub total_failed: u64,
    pub total_interrupted: u64,
    pub overall_total: u64,
    pub pass_rate: f64,
}

impl From<DetailCounts> for DetailSummary {
    fn from(counts: DetailCounts) -> Self {
        Self {
            total_ongoing: counts.ongoing,
            total_passed: counts.passed,
            total_conditional_passed: counts.conditional_passed,
            total_failed: counts.failed,
            total_interrupted: counts.interrupted,
            overall_total: counts.total(),
            pass_rate: pass_rate(counts.passed, counts.failed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestDetailsResponse {
    pub project_uid: String,
    pub project_name: String,
    pub fw_name: String,
    pub sub_version: String,
    pub capacities: Vec<CapacityLabel>,
    pub total_items: usize,
    pub details: Vec<TestItemDetail>,
    pub summary: DetailSummary,
}

/// Build the per-item detail view from the first firmware's `details`.
///
/// Items keep their input order; only the capacity list is sorted.
pub fn build_test_details(raw: &Value) -> TestDetailsResponse {
    let project_name = Fields::of(raw).str_or("projectName", "");

    let Some(fw) = FirmwareSelection::First.select(raw).first() else {
        return TestDetailsResponse {
            project_name,
            ..TestDetailsResponse::default()
        };
    };

    let fw = Fields::of(fw);
    let details: Vec<TestItemDetail> = fw
        .list("details")
        .iter()
        .map(TestItemDetail::from_record)
        .collect();

    let mut totals = DetailCounts::default();
    let mut capacities = BTreeSet::new();
    for item in &details {
        totals += item.total.counts;
        capacities.extend(item.size_results.iter().map(|s| CapacityLabel::new(s.size.as_str())));
    }

    TestDetailsResponse {
        project_uid: fw.str_or("projectUid", ""),
        project_name,
        fw_name: fw.str_or("fwName", ""),
        sub_version: fw.str_or("subVersionName", ""),
        capacities: capacities.into_iter().collect(),
        total_items: details.len(),
        details,
        summary: totals.into(),
    }
}
