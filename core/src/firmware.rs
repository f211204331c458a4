//! Firmware statistics: per-firmware detail, single-firmware summary and
//! the cross-firmware aggregate.
//!
//! Each provider firmware record has two internal blocks and one external
//! block. Counters default to 0, text to `""`, and percentage strings are
//! decoded with [`parse_percentage`] and rounded to two decimals.

use serde::Serialize;
use serde_json::Value;

use crate::fields::Fields;
use crate::parsing::parse_percentage;
use crate::rates::{pass_rate, round2};

/// Which firmwares of a document a builder consumes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirmwareSelection {
    /// Singleton endpoints read only the first firmware
    First,
    /// Project-wide endpoints read every firmware
    All,
}

impl FirmwareSelection {
    /// The selected slice of the document's `fws` array
    pub fn select(self, raw: &Value) -> &[Value] {
        let fws = Fields::of(raw).list("fws");
        match self {
            FirmwareSelection::First => &fws[..fws.len().min(1)],
            FirmwareSelection::All => fws,
        }
    }
}

/// `internalSummary_1` plus `internalSummary_2`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InternalSummary {
    pub task_name: String,
    pub total_samples: u64,
    pub sample_used_rate: f64,
    pub total_test_items: u64,
    pub passed: u64,
    pub failed: u64,
    pub conditional_passed: u64,
    pub completion_rate: f64,
    pub real_test_count: u64,
}

/// `externalSummary`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExternalSummary {
    pub total_sample_quantity: u64,
    pub sample_utilization_rate: f64,
    pub passed: u64,
    pub failed: u64,
    pub sample_completion_rate: f64,
    pub sample_fail_rate: f64,
    pub execution_rate: f64,
    pub item_fail_rate: f64,
    pub item_passed: u64,
    pub item_failed: u64,
    pub total_items: u64,
}

/// One firmware with both statistic blocks normalized
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FirmwareDetail {
    pub project_uid: String,
    pub fw_name: String,
    pub sub_version: String,
    pub internal_summary: InternalSummary,
    pub external_summary: ExternalSummary,
}

fn rate(fields: &Fields<'_>, key: &str) -> f64 {
    parse_percentage(fields.opt_str(key))
}

impl FirmwareDetail {
    /// Normalize one raw provider firmware record
    pub fn from_record(fw: &Value) -> Self {
        Self::decode(fw).0
    }

    /// Decode the record and also return the unrounded sample-used rate,
    /// which the sample count derivation needs.
    fn decode(fw: &Value) -> (Self, f64) {
        let fw = Fields::of(fw);
        let internal_1 = fw.nested("internalSummary_1");
        let internal_2 = fw.nested("internalSummary_2");
        let external = fw.nested("externalSummary");

        let sample_used_rate = rate(&internal_1, "sampleUsedRate");

        let detail = Self {
            project_uid: fw.str_or("projectUid", ""),
            fw_name: fw.str_or("fwName", ""),
            sub_version: fw.str_or("subVersionName", ""),
            internal_summary: InternalSummary {
                task_name: internal_1.str_or("name", ""),
                total_samples: internal_1.u64_or("totalStmsSampleCount", 0),
                sample_used_rate: round2(sample_used_rate),
                total_test_items: internal_1.u64_or("totalTestItems", 0),
                passed: internal_1.u64_or("passedCnt", 0),
                failed: internal_1.u64_or("failedCnt", 0),
                conditional_passed: internal_1.u64_or("conditionalPassedCnt", 0),
                completion_rate: round2(rate(&internal_1, "completionRate")),
                real_test_count: internal_2.u64_or("realTestCount", 0),
            },
            external_summary: ExternalSummary {
                total_sample_quantity: external.u64_or("totalSampleQuantity", 0),
                sample_utilization_rate: round2(rate(&external, "sampleUtilizationRate")),
                passed: external.u64_or("passedCnt", 0),
                failed: external.u64_or("failedCnt", 0),
                sample_completion_rate: round2(rate(&external, "sampleTestItemCompletionRate")),
                sample_fail_rate: round2(rate(&external, "sampleTestItemFailRate")),
                execution_rate: round2(rate(&external, "testItemExecutionRate")),
                item_fail_rate: round2(rate(&external, "testItemFailRate")),
                item_passed: external.u64_or("itemPassedCnt", 0),
                item_failed: external.u64_or("itemFailedCnt", 0),
                total_items: external.u64_or("totalItemCnt", 0),
            },
        };

        (detail, sample_used_rate)
    }
}

/// Samples consumed: `floor(total * rate / 100)`, zero with no samples
pub fn samples_used(total_samples: u64, used_rate: f64) -> u64 {
    if total_samples == 0 {
        return 0;
    }
    (total_samples as f64 * used_rate / 100.0).floor().max(0.0) as u64
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    pub total_test_items: u64,
    pub passed: u64,
    pub failed: u64,
    pub conditional_passed: u64,
    pub completion_rate: f64,
    pub pass_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SampleStats {
    pub total_samples: u64,
    pub samples_used: u64,
    pub utilization_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TestItemStats {
    pub total_items: u64,
    pub passed_items: u64,
    pub failed_items: u64,
    pub execution_rate: f64,
    pub fail_rate: f64,
}

/// Single-firmware summary shape
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FirmwareSummary {
    pub project_uid: String,
    pub fw_name: String,
    pub sub_version: String,
    pub task_name: String,
    pub overview: Overview,
    pub sample_stats: SampleStats,
    pub test_item_stats: TestItemStats,
}

impl FirmwareSummary {
    pub fn from_record(fw: &Value) -> Self {
        let (detail, sample_used_rate) = FirmwareDetail::decode(fw);
        let FirmwareDetail {
            project_uid,
            fw_name,
            sub_version,
            internal_summary: internal,
            external_summary: external,
        } = detail;

        Self {
            project_uid,
            fw_name,
            sub_version,
            overview: Overview {
                total_test_items: internal.total_test_items,
                passed: internal.passed,
                failed: internal.failed,
                conditional_passed: internal.conditional_passed,
                completion_rate: internal.completion_rate,
                pass_rate: pass_rate(internal.passed, internal.failed),
            },
            sample_stats: SampleStats {
                total_samples: internal.total_samples,
                samples_used: samples_used(internal.total_samples, sample_used_rate),
                utilization_rate: internal.sample_used_rate,
            },
            test_item_stats: TestItemStats {
                total_items: external.total_items,
                passed_items: external.item_passed,
                failed_items: external.item_failed,
                execution_rate: external.execution_rate,
                fail_rate: external.item_fail_rate,
            },
            task_name: internal.task_name,
        }
    }
}

/// Sums over every firmware's internal counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct AggregatedStats {
    pub total_test_items: u64,
    pub total_passed: u64,
    pub total_failed: u64,
    pub total_conditional_passed: u64,
    pub overall_pass_rate: f64,
}

impl AggregatedStats {
    /// Field-wise sum; conditional passes stay out of the pass rate
    pub fn from_details(details: &[FirmwareDetail]) -> Self {
        let mut stats = details.iter().fold(Self::default(), |mut acc, fw| {
            let internal = &fw.internal_summary;
            acc.total_test_items = acc
                .total_test_items
                .saturating_add(internal.total_test_items);
            acc.total_passed = acc.total_passed.saturating_add(internal.passed);
            acc.total_failed = acc.total_failed.saturating_add(internal.failed);
            acc.total_conditional_passed = acc
                .total_conditional_passed
                .saturating_add(internal.conditional_passed);
            acc
        });
        stats.overall_pass_rate = pass_rate(stats.total_passed, stats.total_failed);
        stats
    }
}

/// Every firmware of a project plus the aggregate
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FullProjectSummary {
    pub project_id: String,
    pub project_name: String,
    pub total_firmwares: usize,
    pub firmwares: Vec<FirmwareDetail>,
    pub aggregated_stats: AggregatedStats,
}

/// First-firmware summary; an empty `fws` yields the all-default shape
pub fn build_firmware_summary(raw: &Value) -> FirmwareSummary {
    FirmwareSelection::First
        .select(raw)
        .first()
        .map(FirmwareSummary::from_record)
        .unwrap_or_default()
}

/// All-firmware detail list with the cross-firmware aggregate
pub fn build_full_summary(raw: &Value) -> FullProjectSummary {
    let doc = Fields::of(raw);
    let firmwares: Vec<FirmwareDetail> = FirmwareSelection::All
        .select(raw)
        .iter()
        .map(FirmwareDetail::from_record)
        .collect();

    tracing::debug!(firmwares = firmwares.len(), "Built full project summary");

    FullProjectSummary {
        project_id: doc.str_or("projectId", ""),
        project_name: doc.str_or("projectName", ""),
        total_firmwares: firmwares.len(),
        aggregated_stats: AggregatedStats::from_details(&firmwares),
        firmwares,
    }
}
