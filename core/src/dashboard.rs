//! Project dashboard over flat per-firmware item counts
//!
//! Every count may be missing or `null` and is then read as zero.

use serde::Serialize;
use serde_json::Value;

use crate::fields::Fields;
use crate::firmware::FirmwareSelection;
use crate::rates::{pass_rate, percent};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FirmwareDashboard {
    pub fw_name: String,
    pub sub_version: String,
    pub passed: u64,
    pub failed: u64,
    pub ongoing: u64,
    pub interrupted: u64,
    pub total: u64,
    pub pass_rate: f64,
    pub completion_rate: f64,
}

impl FirmwareDashboard {
    pub fn from_record(fw: &Value) -> Self {
        let fw = Fields::of(fw);
        let passed = fw.u64_or("itemPassedCnt", 0);
        let failed = fw.u64_or("itemFailedCnt", 0);
        let total = fw.u64_or("totalItemCnt", 0);

        Self {
            fw_name: fw.str_or("fwName", ""),
            sub_version: fw.str_or("subVersionName", ""),
            passed,
            failed,
            ongoing: fw.u64_or("itemOngoingCnt", 0),
            interrupted: fw.u64_or("itemInterruptCnt", 0),
            total,
            pass_rate: pass_rate(passed, failed),
            completion_rate: percent(passed.saturating_add(failed), total),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_passed: u64,
    pub total_failed: u64,
    pub total_ongoing: u64,
    pub total_interrupted: u64,
    pub overall_total: u64,
    pub overall_pass_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectDashboard {
    pub project_id: String,
    pub project_name: String,
    pub total_firmwares: usize,
    pub firmwares: Vec<FirmwareDashboard>,
    pub summary: DashboardSummary,
}

pub fn build_dashboard(raw: &Value) -> ProjectDashboard {
    let doc = Fields::of(raw);
    let firmwares: Vec<FirmwareDashboard> = FirmwareSelection::All
        .select(raw)
        .iter()
        .map(FirmwareDashboard::from_record)
        .collect();

    let mut summary = DashboardSummary::default();
    for fw in &firmwares {
        summary.total_passed = summary.total_passed.saturating_add(fw.passed);
        summary.total_failed = summary.total_failed.saturating_add(fw.failed);
        summary.total_ongoing = summary.total_ongoing.saturating_add(fw.ongoing);
        summary.total_interrupted = summary.total_interrupted.saturating_add(fw.interrupted);
        summary.overall_total = summary.overall_total.saturating_add(fw.total);
    }
    summary.overall_pass_rate = pass_rate(summary.total_passed, summary.total_failed);

    ProjectDashboard {
        project_id: doc.str_or("projectId", ""),
        project_name: doc.str_or("projectName", ""),
        total_firmwares: firmwares.len(),
        firmwares,
        summary,
    }
}
