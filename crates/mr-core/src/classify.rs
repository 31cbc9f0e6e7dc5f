//! Host version classification.
//!
//! Maps a [`VersionTriple`] onto one of four compatibility buckets using an
//! ordered table of half-open ranges. Rows are matched top to bottom and the
//! first match wins. The rows are contiguous and the last one is unbounded,
//! so every version lands in exactly one bucket.
//!
//! | range            | bucket              |
//! |------------------|---------------------|
//! | `[0.0.0, 5.2.0)` | `PreDirectiveEra`   |
//! | `[5.2.0, 5.4.0)` | `ProbedValue`       |
//! | `[5.4.0, 5.6.0)` | `LegacyStableValue` |
//! | `[5.6.0, ∞)`     | `LatestSentinel`    |
//!
//! New host ranges are added as rows here, not as new branches elsewhere.

use mr_common::VersionTriple;
use serde::{Deserialize, Serialize};

/// Compatibility regime for the include-order directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompatibilityBucket {
    /// The directive does not exist yet; nothing may be set.
    PreDirectiveEra,
    /// Stable name, but the sentinel is unsafe; use the penultimate value.
    LegacyStableValue,
    /// The field exists but is only reachable by name at evaluation time.
    ProbedValue,
    /// The sentinel value is safe to set directly.
    LatestSentinel,
}

impl CompatibilityBucket {
    pub const ALL: [CompatibilityBucket; 4] = [
        CompatibilityBucket::PreDirectiveEra,
        CompatibilityBucket::ProbedValue,
        CompatibilityBucket::LegacyStableValue,
        CompatibilityBucket::LatestSentinel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CompatibilityBucket::PreDirectiveEra => "pre_directive_era",
            CompatibilityBucket::LegacyStableValue => "legacy_stable_value",
            CompatibilityBucket::ProbedValue => "probed_value",
            CompatibilityBucket::LatestSentinel => "latest_sentinel",
        }
    }
}

impl std::fmt::Display for CompatibilityBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the classification table: `[low, high)`.
///
/// `high == None` means the range is unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeRule {
    pub low: VersionTriple,
    pub high: Option<VersionTriple>,
    pub bucket: CompatibilityBucket,
}

impl RangeRule {
    pub fn contains(&self, version: &VersionTriple) -> bool {
        *version >= self.low && self.high.map_or(true, |high| *version < high)
    }
}

pub const COMPATIBILITY_TABLE: &[RangeRule] = &[
    RangeRule {
        low: VersionTriple::new(0, 0, 0),
        high: Some(VersionTriple::new(5, 2, 0)),
        bucket: CompatibilityBucket::PreDirectiveEra,
    },
    RangeRule {
        low: VersionTriple::new(5, 2, 0),
        high: Some(VersionTriple::new(5, 4, 0)),
        bucket: CompatibilityBucket::ProbedValue,
    },
    RangeRule {
        low: VersionTriple::new(5, 4, 0),
        high: Some(VersionTriple::new(5, 6, 0)),
        bucket: CompatibilityBucket::LegacyStableValue,
    },
    RangeRule {
        low: VersionTriple::new(5, 6, 0),
        high: None,
        bucket: CompatibilityBucket::LatestSentinel,
    },
];

/// Classify a host version. Total and deterministic.
pub fn classify(version: &VersionTriple) -> CompatibilityBucket {
    COMPATIBILITY_TABLE
        .iter()
        .find(|rule| rule.contains(version))
        .map(|rule| rule.bucket)
        // Unreachable while the table starts at 0.0.0 and ends unbounded.
        .unwrap_or(CompatibilityBucket::LatestSentinel)
}
