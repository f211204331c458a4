//! Five-outcome counter tuples
//!
//! The provider packs five mutually exclusive outcome counts into one slash
//! string, but not in one order. Category roll-ups send
//! `pass/fail/ongoing/cancel/check`; per-item details send
//! `ongoing/passed/conditional_passed/failed/interrupted`. Each order is its
//! own type, so a roll-up string can never be decoded with the detail layout.

use serde::Serialize;
use std::ops::AddAssign;

use crate::rates::percent;

/// Shared behaviour of the two counter layouts.
///
/// Sums saturate at `u64::MAX` rather than wrapping.
pub trait OutcomeCounts: Sized + Default + Copy {
    /// Build from the five segments in wire order
    fn from_fields(fields: [u64; 5]) -> Self;

    /// Sum of all five outcomes
    fn total(&self) -> u64;

    /// Decode a slash string; anything other than exactly five
    /// non-negative integers yields all zeros.
    fn parse(raw: &str) -> Self {
        let mut fields = [0u64; 5];
        let mut segments = raw.split('/');

        for slot in fields.iter_mut() {
            match segments.next().map(|s| s.trim().parse::<u64>()) {
                Some(Ok(value)) => *slot = value,
                _ => return Self::default(),
            }
        }

        if segments.next().is_some() {
            return Self::default();
        }

        Self::from_fields(fields)
    }
}

/// Category roll-up layout: `pass/fail/ongoing/cancel/check`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RollupCounts {
    pub pass: u64,
    pub fail: u64,
    pub ongoing: u64,
    pub cancel: u64,
    pub check: u64,
}

impl OutcomeCounts for RollupCounts {
    fn from_fields([pass, fail, ongoing, cancel, check]: [u64; 5]) -> Self {
        Self {
            pass,
            fail,
            ongoing,
            cancel,
            check,
        }
    }

    fn total(&self) -> u64 {
        [self.fail, self.ongoing, self.cancel, self.check]
            .into_iter()
            .fold(self.pass, u64::saturating_add)
    }
}

impl AddAssign for RollupCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.pass = self.pass.saturating_add(rhs.pass);
        self.fail = self.fail.saturating_add(rhs.fail);
        self.ongoing = self.ongoing.saturating_add(rhs.ongoing);
        self.cancel = self.cancel.saturating_add(rhs.cancel);
        self.check = self.check.saturating_add(rhs.check);
    }
}

impl RollupCounts {
    /// Attach the derived total and `pass / total` rate
    pub fn stats(self) -> RollupStats {
        let total = self.total();
        RollupStats {
            counts: self,
            total,
            pass_rate: percent(self.pass, total),
        }
    }
}

/// Roll-up counters with their derived total and pass rate.
///
/// The roll-up pass rate divides by every outcome, unlike the decided-only
/// rate used for firmware and detail summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RollupStats {
    #[serde(flatten)]
    pub counts: RollupCounts,
    pub total: u64,
    pub pass_rate: f64,
}

/// Per-item detail layout: `ongoing/passed/conditional_passed/failed/interrupted`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetailCounts {
    pub ongoing: u64,
    pub passed: u64,
    pub conditional_passed: u64,
    pub failed: u64,
    pub interrupted: u64,
}

impl OutcomeCounts for DetailCounts {
    fn from_fields([ongoing, passed, conditional_passed, failed, interrupted]: [u64; 5]) -> Self {
        Self {
            ongoing,
            passed,
            conditional_passed,
            failed,
            interrupted,
        }
    }

    fn total(&self) -> u64 {
        [self.passed, self.conditional_passed, self.failed, self.interrupted]
            .into_iter()
            .fold(self.ongoing, u64::saturating_add)
    }
}

impl AddAssign for DetailCounts {
    fn add_assign(&mut self, rhs: Self) {
        self.ongoing = self.ongoing.saturating_add(rhs.ongoing);
        self.passed = self.passed.saturating_add(rhs.passed);
        self.conditional_passed = self.conditional_passed.saturating_add(rhs.conditional_passed);
        self.failed = self.failed.saturating_add(rhs.failed);
        self.interrupted = self.interrupted.saturating_add(rhs.interrupted);
    }
}

/// Detail counters as emitted per capacity and per item, with their sum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DetailResult {
    #[serde(flatten)]
    pub counts: DetailCounts,
    pub total: u64,
}

impl From<DetailCounts> for DetailResult {
    fn from(counts: DetailCounts) -> Self {
        Self {
            counts,
            total: counts.total(),
        }
    }
}
