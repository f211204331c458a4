//! Category roll-up across test plans
//!
//! A summary document carries, for its first firmware, a list of plans, each
//! with category items broken down by capacity. Same-named categories from
//! different plans merge into one bucket, and every bucket gets a derived
//! total and pass rate once accumulation is complete.

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

use crate::counters::{OutcomeCounts, RollupCounts, RollupStats};
use crate::fields::Fields;
use crate::firmware::FirmwareSelection;
use crate::parsing::CapacityLabel;
use crate::rates::percent;

const UNKNOWN: &str = "Unknown";
const EMPTY_RESULT: &str = "0/0/0/0/0";

/// One category with its per-capacity breakdown and rolled-up total
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryResult {
    pub name: String,
    pub results_by_capacity: BTreeMap<CapacityLabel, RollupStats>,
    pub total: RollupStats,
}

impl CategoryResult {
    /// Stats for one capacity label, if this category saw it
    pub fn capacity(&self, label: &str) -> Option<&RollupStats> {
        self.results_by_capacity.get(&CapacityLabel::new(label))
    }
}

/// Project-wide totals over every category
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RollupSummary {
    pub total_pass: u64,
    pub total_fail: u64,
    pub total_ongoing: u64,
    pub total_cancel: u64,
    pub total_check: u64,
    pub overall_total: u64,
    pub overall_pass_rate: f64,
}

impl From<RollupCounts> for RollupSummary {
    fn from(counts: RollupCounts) -> Self {
        let overall_total = counts.total();
        Self {
            total_pass: counts.pass,
            total_fail: counts.fail,
            total_ongoing: counts.ongoing,
            total_cancel: counts.cancel,
            total_check: counts.check,
            overall_total,
            overall_pass_rate: percent(counts.pass, overall_total),
        }
    }
}

/// Response shape for the per-category test summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectTestSummary {
    pub project_uid: String,
    pub project_name: String,
    pub capacities: Vec<CapacityLabel>,
    pub categories: Vec<CategoryResult>,
    pub summary: RollupSummary,
}

#[derive(Debug, Default)]
struct CategoryBucket {
    by_capacity: BTreeMap<CapacityLabel, RollupCounts>,
    total: RollupCounts,
}

/// Groups category items by name and sums their per-capacity counters.
///
/// Buckets are created only for capacities a category actually reports;
/// categories are not padded to the global capacity set.
#[derive(Debug, Default)]
pub struct CategoryAccumulator {
    categories: BTreeMap<String, CategoryBucket>,
    capacities: BTreeSet<CapacityLabel>,
}

impl CategoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one category item's capacity entries under `name`
    pub fn add_item<I>(&mut self, name: &str, entries: I)
    where
        I: IntoIterator<Item = (CapacityLabel, RollupCounts)>,
    {
        let bucket = self.categories.entry(name.to_string()).or_default();

        for (capacity, counts) in entries {
            *bucket.by_capacity.entry(capacity.clone()).or_default() += counts;
            bucket.total += counts;
            self.capacities.insert(capacity);
        }
    }

    /// Add a raw provider category item (`categoryName`, `sizeResult[]`)
    pub fn add_raw_item(&mut self, item: &Value) {
        let fields = Fields::of(item);
        let name = fields.str_or("categoryName", UNKNOWN);

        let entries = fields.list("sizeResult").iter().map(|entry| {
            let entry = Fields::of(entry);
            let capacity = CapacityLabel::new(entry.str_or("size", UNKNOWN));
            let counts = RollupCounts::parse(entry.opt_str("result").unwrap_or(EMPTY_RESULT));
            (capacity, counts)
        });

        self.add_item(&name, entries);
    }

    /// Derive rates and produce categories sorted by name, capacities
    /// sorted by size, and the global summary.
    pub fn finish(self) -> (Vec<CapacityLabel>, Vec<CategoryResult>, RollupSummary) {
        let mut overall = RollupCounts::default();

        let categories: Vec<CategoryResult> = self
            .categories
            .into_iter()
            .map(|(name, bucket)| {
                overall += bucket.total;
                CategoryResult {
                    name,
                    results_by_capacity: bucket
                        .by_capacity
                        .into_iter()
                        .map(|(capacity, counts)| (capacity, counts.stats()))
                        .collect(),
                    total: bucket.total.stats(),
                }
            })
            .collect();

        (
            self.capacities.into_iter().collect(),
            categories,
            RollupSummary::from(overall),
        )
    }
}

/// Build the category test summary from a raw summary document.
///
/// Only the first firmware is considered. No firmwares, or a firmware
/// without plans, produce empty collections and a zeroed summary.
pub fn build_test_summary(raw: &Value) -> ProjectTestSummary {
    let doc = Fields::of(raw);
    let project_name = doc.str_or("projectName", "");

    let Some(fw) = FirmwareSelection::First.select(raw).first() else {
        return ProjectTestSummary {
            project_uid: String::new(),
            project_name,
            capacities: Vec::new(),
            categories: Vec::new(),
            summary: RollupSummary::default(),
        };
    };

    let fw = Fields::of(fw);
    let mut accumulator = CategoryAccumulator::new();

    for plan in fw.list("plans") {
        for item in Fields::of(plan).list("categoryItems") {
            accumulator.add_raw_item(item);
        }
    }

    let (capacities, categories, summary) = accumulator.finish();
    tracing::debug!(
        categories = categories.len(),
        capacities = capacities.len(),
        "Built category test summary"
    );

    ProjectTestSummary {
        project_uid: fw.str_or("projectUid", ""),
        project_name,
        capacities,
        categories,
        summary,
    }
}
