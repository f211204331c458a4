//! Micro-format parsers for provider strings
//!
//! The provider encodes rates and ratios as display strings such as
//! `"61/61 (100%)"`, `"26%"` or `"0/140 (0%)"`. These parsers are total:
//! malformed input decodes to zero rather than failing the request.

use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;

/// Parse a percentage display string into `0.0..=100.0`.
///
/// - `"num/den (NN%)"`: the number between the last `(` and the last `%`
/// - `"NN%"`: the number with `%` removed
/// - anything else, empty or absent: `0.0`
pub fn parse_percentage(raw: Option<&str>) -> f64 {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return 0.0;
    };

    let number = if raw.contains('(') && raw.contains('%') {
        match (raw.rfind('('), raw.rfind('%')) {
            (Some(open), Some(pct)) if pct > open => &raw[open + 1..pct],
            _ => return 0.0,
        }
    } else if raw.contains('%') {
        return parse_finite(&raw.replace('%', ""));
    } else {
        return 0.0;
    };

    parse_finite(number)
}

fn parse_finite(number: &str) -> f64 {
    number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse `"num/den"` or `"num/den (pct%)"` into `(num, den)`; `(0, 0)` on
/// anything malformed. Segments after the second `/` are ignored.
pub fn parse_fraction(raw: Option<&str>) -> (u64, u64) {
    let Some(raw) = raw.filter(|s| s.contains('/')) else {
        return (0, 0);
    };

    let ratio = raw.split('(').next().unwrap_or_default().trim();
    let mut parts = ratio.split('/');
    let numerator = parts.next().and_then(|p| p.trim().parse().ok());
    let denominator = parts.next().and_then(|p| p.trim().parse().ok());

    match (numerator, denominator) {
        (Some(n), Some(d)) => (n, d),
        _ => (0, 0),
    }
}

/// Storage-size label such as `"512GB"` or `"2TB"`.
///
/// Ordered by numeric size with `1TB == 1000GB` (ordering only, never used
/// in arithmetic). Labels that do not parse sort as zero; ties fall back to
/// the label text so the order is total and deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CapacityLabel(String);

impl CapacityLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric sort key: `"GB"` is dropped, `"TB"` becomes `"000"`
    pub fn sort_key(&self) -> u64 {
        self.0
            .replace("GB", "")
            .replace("TB", "000")
            .trim()
            .parse()
            .unwrap_or(0)
    }
}

impl Ord for CapacityLabel {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key()
            .cmp(&other.sort_key())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for CapacityLabel {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for CapacityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for CapacityLabel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Deduplicate and sort capacity labels by size.
pub fn sort_capacities<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut sorted: Vec<CapacityLabel> = labels.into_iter().map(CapacityLabel::new).collect();
    sorted.sort();
    sorted.dedup();
    sorted.into_iter().map(|label| label.0).collect()
}
