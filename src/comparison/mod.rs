//! Issue snapshot comparison
//!
//! Computes per-tier deltas between two scans, decides whether the later
//! scan is an improvement and ranks scans by how much they improved.

pub mod engine;
pub mod snapshot;

pub use engine::{
    ComparisonEngine, ComparisonResult, RankMetric, SeverityDelta, TierTrends, Trend,
};
pub use snapshot::{ComplianceScore, IssueCounts, IssueSnapshot};
