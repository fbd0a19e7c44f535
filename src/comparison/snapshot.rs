//! Issue snapshot data types

use crate::error::OobeeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Issue counts per severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueCounts {
    /// Must-fix issues (WCAG A/AA failures)
    pub must_fix: u32,
    /// Should-fix issues
    pub should_fix: u32,
    /// Nice-to-have improvements
    pub nice_to_have: u32,
}

impl IssueCounts {
    /// Create counts for the three tiers
    pub fn new(must_fix: u32, should_fix: u32, nice_to_have: u32) -> Self {
        Self {
            must_fix,
            should_fix,
            nice_to_have,
        }
    }

    /// Sum over all tiers
    pub fn total(&self) -> u64 {
        u64::from(self.must_fix) + u64::from(self.should_fix) + u64::from(self.nice_to_have)
    }
}

/// Compliance percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u8")]
pub struct ComplianceScore(u8);

impl ComplianceScore {
    /// Highest possible score
    pub const MAX: u8 = 100;

    /// Score as a plain number
    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for ComplianceScore {
    type Error = OobeeError;

    fn try_from(score: u32) -> Result<Self, Self::Error> {
        if score > u32::from(Self::MAX) {
            return Err(OobeeError::InvalidScore { score });
        }
        Ok(Self(score as u8))
    }
}

impl From<ComplianceScore> for u8 {
    fn from(score: ComplianceScore) -> Self {
        score.0
    }
}

impl fmt::Display for ComplianceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// One scan's recorded issue counts and compliance score
///
/// The score is recorded alongside the counts, not derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueSnapshot {
    /// Opaque identifier
    pub id: String,
    /// Unix timestamp of the scan, in seconds
    pub timestamp: u64,
    /// Issue counts per tier
    pub counts: IssueCounts,
    /// Compliance score of the scan
    pub compliance_score: ComplianceScore,
}

impl IssueSnapshot {
    /// Create a snapshot, validating the compliance score
    ///
    /// # Examples
    ///
    /// ```
    /// use oobee_scan::comparison::{IssueCounts, IssueSnapshot};
    ///
    /// let snapshot = IssueSnapshot::new("scan-1", 1_700_000_000, IssueCounts::new(8, 12, 15), 67)?;
    /// assert_eq!(snapshot.compliance_score.get(), 67);
    ///
    /// assert!(IssueSnapshot::new("scan-2", 0, IssueCounts::default(), 101).is_err());
    /// # Ok::<(), oobee_scan::error::OobeeError>(())
    /// ```
    pub fn new(
        id: impl Into<String>,
        timestamp: u64,
        counts: IssueCounts,
        compliance_score: u32,
    ) -> Result<Self, OobeeError> {
        Ok(Self {
            id: id.into(),
            timestamp,
            counts,
            compliance_score: ComplianceScore::try_from(compliance_score)?,
        })
    }

    /// Create a snapshot stamped with the current time and a fresh id
    pub fn record(counts: IssueCounts, compliance_score: u32) -> anyhow::Result<Self> {
        let id = format!("scan-{}", uuid::Uuid::new_v4().simple());
        Self::record_as(id, counts, compliance_score)
    }

    /// Create a snapshot with a chosen id, stamped with the current time
    pub fn record_as(
        id: impl Into<String>,
        counts: IssueCounts,
        compliance_score: u32,
    ) -> anyhow::Result<Self> {
        use anyhow::Context;

        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("System clock is before Unix epoch")?
            .as_secs();
        Ok(Self::new(id, timestamp, counts, compliance_score)?)
    }
}
