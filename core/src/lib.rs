//! SAF Gateway Core
//!
//! Pure transforms from the SAF provider's loosely typed JSON into the
//! stable response shapes served by the gateway. Nothing in this crate does
//! I/O; every builder takes one raw document and returns a serializable
//! value. Malformed counters and percentages decode to zero instead of
//! failing.

pub mod category;
pub mod counters;
pub mod dashboard;
pub mod details;
pub mod fields;
pub mod firmware;
pub mod known_issues;
pub mod parsing;
pub mod projects;
pub mod rates;

pub use category::{build_test_summary, CategoryAccumulator, CategoryResult, ProjectTestSummary};
pub use counters::{DetailCounts, OutcomeCounts, RollupCounts};
pub use dashboard::{build_dashboard, ProjectDashboard};
pub use details::{build_test_details, TestDetailsResponse};
pub use fields::Fields;
pub use firmware::{
    build_firmware_summary, build_full_summary, AggregatedStats, FirmwareDetail,
    FirmwareSelection, FirmwareSummary, FullProjectSummary,
};
pub use known_issues::{build_known_issue_list, KnownIssue, KnownIssueList};
pub use parsing::{parse_fraction, parse_percentage, sort_capacities, CapacityLabel};
pub use projects::{flatten_projects, ProjectCounts, ProjectNode, ProjectPage, Tally};
pub use rates::{pass_rate, percent, round2};
