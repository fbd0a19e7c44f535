//! JSON output formatting for scripted use

use super::{RankEntry, RankOrder};
use crate::comparison::{
    ComparisonResult, IssueCounts, IssueSnapshot, RankMetric, SeverityDelta, TierTrends,
};
use serde::{Deserialize, Serialize};

/// JSON output structure for `compare` and `rank`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonOutput {
    /// Whether a result was produced
    pub success: bool,
    /// Comparison result (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonInfo>,
    /// Ranking result (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<RankingInfo>,
    /// Human-readable message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Comparison results for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonInfo {
    /// Earlier snapshot id
    pub from: String,
    /// Later snapshot id
    pub to: String,
    /// `from.counts - to.counts` per tier
    pub delta: SeverityDelta,
    /// `to.score - from.score`
    pub score_delta: i32,
    /// Overall verdict
    pub is_improvement: bool,
    /// Per-tier direction of change
    pub trends: TierTrends,
    /// One-line summary
    pub summary: String,
}

impl ComparisonInfo {
    /// Convert from ComparisonResult
    pub fn from_result(result: &ComparisonResult) -> Self {
        Self {
            from: result.from_id.clone(),
            to: result.to_id.clone(),
            delta: result.delta,
            score_delta: result.score_delta,
            is_improvement: result.is_improvement,
            trends: result.tier_trends(),
            summary: result.summary(),
        }
    }
}

/// Ranking results for JSON output
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingInfo {
    /// Snapshot every entry is measured against
    pub baseline: String,
    /// Metric the entries are sorted by
    pub by: RankMetric,
    /// Which end of the ranking comes first
    pub order: RankOrder,
    /// Entries in rank order
    pub entries: Vec<RankingRow>,
}

/// One ranked snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRow {
    /// 1-based position
    pub rank: usize,
    /// Snapshot id
    pub id: String,
    /// Snapshot counts
    pub counts: IssueCounts,
    /// Snapshot compliance score
    pub compliance_score: u8,
    /// Must-fix issues resolved since the baseline
    pub must_fix_delta: i64,
    /// Score change since the baseline
    pub score_delta: i32,
    /// Verdict against the baseline
    pub is_improvement: bool,
}

impl RankingRow {
    /// Convert from RankEntry
    pub fn from_entry(entry: &RankEntry) -> Self {
        Self {
            rank: entry.rank,
            id: entry.snapshot.id.clone(),
            counts: entry.snapshot.counts,
            compliance_score: entry.snapshot.compliance_score.get(),
            must_fix_delta: entry.result.delta.must_fix,
            score_delta: entry.result.score_delta,
            is_improvement: entry.result.is_improvement,
        }
    }
}

impl JsonOutput {
    /// Output for a completed comparison
    pub fn from_comparison(result: &ComparisonResult) -> Self {
        Self {
            success: true,
            comparison: Some(ComparisonInfo::from_result(result)),
            ranking: None,
            message: None,
        }
    }

    /// Output for a comparison of a scan with itself
    pub fn select_distinct_scans() -> Self {
        Self {
            success: false,
            comparison: None,
            ranking: None,
            message: Some("Select two different scans to compare".to_string()),
        }
    }

    /// Output for a ranking
    pub fn from_ranking(
        baseline: &IssueSnapshot,
        by: RankMetric,
        order: RankOrder,
        entries: &[RankEntry],
    ) -> Self {
        Self {
            success: true,
            comparison: None,
            ranking: Some(RankingInfo {
                baseline: baseline.id.clone(),
                by,
                order,
                entries: entries.iter().map(RankingRow::from_entry).collect(),
            }),
            message: None,
        }
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize JSON output: {}", e))
    }

    /// Print JSON to stdout
    pub fn print(&self) {
        match self.to_json() {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error formatting JSON: {}", e),
        }
    }
}
