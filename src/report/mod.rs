//! Rendering of comparisons, rankings and history
//!
//! Provides:
//! - Console tables with styled verdicts
//! - JSON output for scripted use

pub mod display;
pub mod json;

pub use display::ComparisonReporter;
pub use json::JsonOutput;

use crate::comparison::{ComparisonEngine, ComparisonResult, IssueSnapshot, RankMetric};
use serde::{Deserialize, Serialize};

/// One row of a ranking, measured against the baseline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    /// 1-based position
    pub rank: usize,
    /// Ranked snapshot
    pub snapshot: IssueSnapshot,
    /// Comparison of the baseline with this snapshot
    pub result: ComparisonResult,
}

/// Which end of the ranking comes first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankOrder {
    /// Largest improvement first
    #[default]
    MostImproved,
    /// Smallest improvement (or largest regression) first
    LeastImproved,
}

impl RankOrder {
    /// Heading used in console output
    pub fn title(self) -> &'static str {
        match self {
            Self::MostImproved => "Most improved",
            Self::LeastImproved => "Least improved",
        }
    }
}

/// Rank `snapshots` against `baseline` and attach each entry's comparison
pub fn rank_entries(
    engine: &ComparisonEngine,
    baseline: &IssueSnapshot,
    snapshots: &[IssueSnapshot],
    by: RankMetric,
    order: RankOrder,
) -> Vec<RankEntry> {
    let ranked = match order {
        RankOrder::MostImproved => engine.rank(baseline, snapshots, by),
        RankOrder::LeastImproved => engine.least_improved(baseline, snapshots, by),
    };

    ranked
        .into_iter()
        .enumerate()
        .map(|(index, snapshot)| RankEntry {
            rank: index + 1,
            result: engine.diff(baseline, &snapshot),
            snapshot,
        })
        .collect()
}
