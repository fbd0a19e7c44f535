//! Snapshot comparison logic
//!
//! Sign convention: `delta = a.counts - b.counts`, so a positive tier delta
//! means `b` has fewer issues on that tier. `score_delta = b - a`, so a
//! positive value means `b` scored higher.

use super::snapshot::IssueSnapshot;
use crate::error::OobeeError;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// Signed per-tier difference between two snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeverityDelta {
    /// `a.mustFix - b.mustFix`
    pub must_fix: i64,
    /// `a.shouldFix - b.shouldFix`
    pub should_fix: i64,
    /// `a.niceToHave - b.niceToHave`
    pub nice_to_have: i64,
    /// Sum of the three tiers
    pub total: i64,
}

impl SeverityDelta {
    /// True when every tier is unchanged
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Direction of change on one tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Trend {
    /// Fewer issues in the later snapshot
    Improved,
    /// More issues in the later snapshot
    Regressed,
    /// Same count
    Unchanged,
}

impl Trend {
    fn from_delta(delta: i64) -> Self {
        match delta {
            d if d > 0 => Self::Improved,
            d if d < 0 => Self::Regressed,
            _ => Self::Unchanged,
        }
    }
}

/// Per-tier trends of a comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierTrends {
    /// Must-fix trend
    pub must_fix: Trend,
    /// Should-fix trend
    pub should_fix: Trend,
    /// Nice-to-have trend
    pub nice_to_have: Trend,
}

/// Delta and verdict between two snapshots. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResult {
    /// Id of snapshot `a`
    pub from_id: String,
    /// Id of snapshot `b`
    pub to_id: String,
    /// `a.counts - b.counts`
    pub delta: SeverityDelta,
    /// `b.complianceScore - a.complianceScore`
    pub score_delta: i32,
    /// Must-fix count went down and the score went up
    pub is_improvement: bool,
}

impl ComparisonResult {
    /// Per-tier classification for "what improved" panels
    pub fn tier_trends(&self) -> TierTrends {
        TierTrends {
            must_fix: Trend::from_delta(self.delta.must_fix),
            should_fix: Trend::from_delta(self.delta.should_fix),
            nice_to_have: Trend::from_delta(self.delta.nice_to_have),
        }
    }

    /// Value of this comparison under `metric`
    pub fn metric(&self, metric: RankMetric) -> i64 {
        match metric {
            RankMetric::MustFixDelta => self.delta.must_fix,
            RankMetric::ScoreDelta => i64::from(self.score_delta),
        }
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let verdict = if self.is_improvement {
            "improved"
        } else {
            "not improved"
        };
        format!(
            "{} -> {}: {:+} issues resolved ({:+} must-fix), score {:+}, {}",
            self.from_id,
            self.to_id,
            self.delta.total,
            self.delta.must_fix,
            self.score_delta,
            verdict
        )
    }
}

/// What a ranking sorts by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RankMetric {
    /// Reduction in must-fix issues
    #[default]
    #[serde(rename = "must-fix", alias = "mustFixDelta")]
    MustFixDelta,
    /// Increase in compliance score
    #[serde(rename = "score", alias = "scoreDelta")]
    ScoreDelta,
}

impl RankMetric {
    /// Accepted names, in declaration order
    pub const NAMES: &'static [&'static str] = &["must-fix", "score"];

    /// Stable name used in config and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MustFixDelta => "must-fix",
            Self::ScoreDelta => "score",
        }
    }
}

impl fmt::Display for RankMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RankMetric {
    type Err = OobeeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "must-fix" | "mustFixDelta" => Ok(Self::MustFixDelta),
            "score" | "scoreDelta" => Ok(Self::ScoreDelta),
            _ => Err(OobeeError::InvalidRankMetric {
                metric: s.to_string(),
                valid_metrics: Self::NAMES.iter().map(|n| n.to_string()).collect(),
            }),
        }
    }
}

/// Compares and ranks issue snapshots
#[derive(Debug, Clone, Copy, Default)]
pub struct ComparisonEngine;

impl ComparisonEngine {
    /// Create a new comparison engine
    pub fn new() -> Self {
        Self
    }

    /// Compare snapshot `a` (earlier) with snapshot `b` (later).
    ///
    /// Total over all inputs. Comparing a snapshot with itself yields a zero
    /// delta and no improvement; callers that must reject identical
    /// selections do so before calling.
    ///
    /// # Examples
    ///
    /// ```
    /// use oobee_scan::comparison::{ComparisonEngine, IssueCounts, IssueSnapshot};
    ///
    /// let a = IssueSnapshot::new("a", 0, IssueCounts::new(8, 12, 15), 67)?;
    /// let b = IssueSnapshot::new("b", 1, IssueCounts::new(3, 8, 12), 85)?;
    ///
    /// let result = ComparisonEngine::new().diff(&a, &b);
    /// assert_eq!(result.delta.must_fix, 5);
    /// assert_eq!(result.delta.total, 12);
    /// assert_eq!(result.score_delta, 18);
    /// assert!(result.is_improvement);
    /// # Ok::<(), oobee_scan::error::OobeeError>(())
    /// ```
    pub fn diff(&self, a: &IssueSnapshot, b: &IssueSnapshot) -> ComparisonResult {
        let must_fix = i64::from(a.counts.must_fix) - i64::from(b.counts.must_fix);
        let should_fix = i64::from(a.counts.should_fix) - i64::from(b.counts.should_fix);
        let nice_to_have = i64::from(a.counts.nice_to_have) - i64::from(b.counts.nice_to_have);
        let score_delta =
            i32::from(b.compliance_score.get()) - i32::from(a.compliance_score.get());

        ComparisonResult {
            from_id: a.id.clone(),
            to_id: b.id.clone(),
            delta: SeverityDelta {
                must_fix,
                should_fix,
                nice_to_have,
                total: must_fix + should_fix + nice_to_have,
            },
            score_delta,
            is_improvement: must_fix > 0 && score_delta > 0,
        }
    }

    /// Order `snapshots` most-improved first, measuring each against
    /// `baseline`. Equal values keep their input order.
    ///
    /// `baseline` is only the reference point and never appears in the
    /// output unless it is also passed in `snapshots`.
    pub fn rank(
        &self,
        baseline: &IssueSnapshot,
        snapshots: &[IssueSnapshot],
        by: RankMetric,
    ) -> Vec<IssueSnapshot> {
        let mut scored: Vec<(i64, &IssueSnapshot)> = snapshots
            .iter()
            .map(|s| (self.diff(baseline, s).metric(by), s))
            .collect();
        // sort_by_key is stable
        scored.sort_by_key(|(value, _)| Reverse(*value));
        scored.into_iter().map(|(_, s)| s.clone()).collect()
    }

    /// Order `snapshots` least-improved first against `baseline`. Equal
    /// values keep their input order. Backs `oobee rank --least`.
    pub fn least_improved(
        &self,
        baseline: &IssueSnapshot,
        snapshots: &[IssueSnapshot],
        by: RankMetric,
    ) -> Vec<IssueSnapshot> {
        let mut scored: Vec<(i64, &IssueSnapshot)> = snapshots
            .iter()
            .map(|s| (self.diff(baseline, s).metric(by), s))
            .collect();
        scored.sort_by_key(|(value, _)| *value);
        scored.into_iter().map(|(_, s)| s.clone()).collect()
    }

    /// Leaderboard over independent `(before, after)` pairs, most-improved
    /// first. Equal values keep their input order.
    ///
    /// The CLI ranks a single history against one baseline; this form is for
    /// library callers holding pairs from separate sites or scan series.
    pub fn rank_pairs(
        &self,
        pairs: &[(IssueSnapshot, IssueSnapshot)],
        by: RankMetric,
    ) -> Vec<ComparisonResult> {
        let mut results: Vec<ComparisonResult> =
            pairs.iter().map(|(a, b)| self.diff(a, b)).collect();
        results.sort_by_key(|r| Reverse(r.metric(by)));
        results
    }
}
