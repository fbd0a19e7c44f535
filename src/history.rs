//! Scan snapshot history
//!
//! Stores recorded scans under the `oobee.scanHistory` key to:
//! - Feed the before/after comparison view
//! - Provide a baseline for rankings
//!
//! Unlike the option record, a malformed history is an error: it holds data
//! the user recorded, not preferences that can be silently reset.

use crate::comparison::{ComparisonEngine, ComparisonResult, IssueSnapshot};
use crate::error::OobeeError;
use crate::infra::KeyValueStore;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Storage key of the persisted history
pub const SCAN_HISTORY_KEY: &str = "oobee.scanHistory";

/// What the comparison view should show for a pair of selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// The same scan was picked twice; prompt for two different scans
    SelectDistinctScans,
    /// Two different scans were compared
    Compared(ComparisonResult),
}

/// Snapshot history (newest first)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotHistory {
    /// Recorded snapshots, newest first
    pub records: Vec<IssueSnapshot>,
}

impl SnapshotHistory {
    /// Default number of snapshots kept
    pub const MAX_RECORDS: usize = 100;

    /// Create a new empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Load history from `store`; an absent record is an empty history
    pub fn load<S: KeyValueStore>(store: &S) -> Result<Self> {
        let raw = store
            .get(SCAN_HISTORY_KEY)
            .map_err(|source| OobeeError::StorageUnavailable {
                key: SCAN_HISTORY_KEY.to_string(),
                source,
            })
            .context("Failed to read scan history")?;

        let Some(raw) = raw else {
            return Ok(Self::new());
        };

        let history: SnapshotHistory =
            serde_json::from_str(&raw).context("Failed to parse scan history")?;
        Ok(history)
    }

    /// Save history to `store`, overwriting the previous record
    pub fn save<S: KeyValueStore>(&self, store: &S) -> Result<()> {
        let contents =
            serde_json::to_string_pretty(self).context("Failed to serialize scan history")?;

        store
            .set(SCAN_HISTORY_KEY, &contents)
            .map_err(|source| OobeeError::StorageUnavailable {
                key: SCAN_HISTORY_KEY.to_string(),
                source,
            })
            .context("Failed to write scan history")?;

        Ok(())
    }

    /// Add a snapshot, keeping at most `MAX_RECORDS`.
    ///
    /// Returns true when a snapshot with the same id was replaced.
    pub fn add(&mut self, snapshot: IssueSnapshot) -> bool {
        self.add_with_limit(snapshot, Self::MAX_RECORDS)
    }

    /// Add a snapshot, keeping at most `limit` records
    pub fn add_with_limit(&mut self, snapshot: IssueSnapshot, limit: usize) -> bool {
        let replaced = match self.records.iter().position(|s| s.id == snapshot.id) {
            Some(index) => {
                self.records.remove(index);
                true
            }
            None => false,
        };

        self.records.insert(0, snapshot);
        self.records.truncate(limit.max(1));
        replaced
    }

    /// Look up a snapshot by id
    pub fn get(&self, id: &str) -> Option<&IssueSnapshot> {
        self.records.iter().find(|s| s.id == id)
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<&IssueSnapshot> {
        self.records.first()
    }

    /// Oldest snapshot still kept
    pub fn oldest(&self) -> Option<&IssueSnapshot> {
        self.records.last()
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Compare two recorded snapshots by id, `a_id` being the earlier one
    pub fn compare(&self, a_id: &str, b_id: &str) -> Result<ComparisonOutcome, OobeeError> {
        let a = self.require(a_id)?;
        let b = self.require(b_id)?;

        if a.id == b.id {
            return Ok(ComparisonOutcome::SelectDistinctScans);
        }

        Ok(ComparisonOutcome::Compared(
            ComparisonEngine::new().diff(a, b),
        ))
    }

    fn require(&self, id: &str) -> Result<&IssueSnapshot, OobeeError> {
        self.get(id).ok_or_else(|| OobeeError::SnapshotNotFound { id: id.to_string() })
    }
}
