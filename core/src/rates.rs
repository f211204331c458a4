//! Derived-rate arithmetic shared by every summary builder.
//!
//! All rates are percentages rounded to two decimals, and every zero
//! denominator yields exactly `0.0`.

/// Round to two decimal places, ties to even on the exact binary value
pub fn round2(value: f64) -> f64 {
    format!("{:.2}", value).parse().unwrap_or(value)
}

/// `numerator / denominator * 100`, rounded; `0.0` when `denominator == 0`
pub fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    round2(numerator as f64 / denominator as f64 * 100.0)
}

/// Pass rate over decided outcomes only: `passed / (passed + failed)`.
///
/// Conditional passes, ongoing and interrupted runs stay out of the
/// denominator.
pub fn pass_rate(passed: u64, failed: u64) -> f64 {
    percent(passed, passed.saturating_add(failed))
}
