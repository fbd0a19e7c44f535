#![warn(missing_docs)]
#![warn(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! oobee-scan library
//!
//! This library keeps a user's advanced accessibility-scan options across
//! sessions and compares recorded scan results. It can be used
//! programmatically in addition to the `oobee` CLI.
//!
//! # Basic Example
//!
//! Persisting scan options:
//!
//! ```
//! use oobee_scan::infra::MemoryKeyValueStore;
//! use oobee_scan::options::{ScanConfigStore, ScanOptions, ScanOptionsPatch, Viewport};
//!
//! let backend = MemoryKeyValueStore::new();
//! let store = ScanConfigStore::open(backend.clone());
//!
//! // Nothing stored yet: hardcoded defaults
//! assert_eq!(store.current(), ScanOptions::default());
//!
//! store.update(&ScanOptionsPatch::new().viewport(Viewport::Mobile));
//!
//! // The next session sees the saved value
//! let next_session = ScanConfigStore::open(backend);
//! assert_eq!(next_session.current().viewport, Viewport::Mobile);
//! ```
//!
//! # Advanced Example: Comparing Scans
//!
//! ```
//! use oobee_scan::comparison::{ComparisonEngine, IssueCounts, IssueSnapshot, RankMetric};
//!
//! let jan = IssueSnapshot::new("jan", 0, IssueCounts::new(8, 12, 15), 67)?;
//! let feb = IssueSnapshot::new("feb", 1, IssueCounts::new(3, 8, 12), 85)?;
//! let mar = IssueSnapshot::new("mar", 2, IssueCounts::new(6, 8, 12), 70)?;
//!
//! let engine = ComparisonEngine::new();
//! let result = engine.diff(&jan, &feb);
//! assert_eq!(result.delta.total, 12);
//! assert!(result.is_improvement);
//!
//! let ranked = engine.rank(&jan, &[mar, feb], RankMetric::MustFixDelta);
//! assert_eq!(ranked[0].id, "feb");
//! # Ok::<(), oobee_scan::error::OobeeError>(())
//! ```
//!
//! # Advanced Example: Scan History
//!
//! ```
//! use oobee_scan::comparison::{IssueCounts, IssueSnapshot};
//! use oobee_scan::history::{ComparisonOutcome, SnapshotHistory};
//! use oobee_scan::infra::MemoryKeyValueStore;
//!
//! let backend = MemoryKeyValueStore::new();
//! let mut history = SnapshotHistory::new();
//! history.add(IssueSnapshot::new("jan", 0, IssueCounts::new(8, 12, 15), 67)?);
//! history.add(IssueSnapshot::new("feb", 1, IssueCounts::new(3, 8, 12), 85)?);
//! history.save(&backend)?;
//!
//! let loaded = SnapshotHistory::load(&backend)?;
//! assert_eq!(loaded.compare("jan", "jan")?, ComparisonOutcome::SelectDistinctScans);
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Command handlers for CLI operations
pub mod cmd;
/// Issue snapshot comparison and ranking
pub mod comparison;
/// Project configuration file management
pub mod config;
/// Enhanced error types with contextual suggestions
pub mod error;
/// Observer side channel for analytics events
pub mod events;
/// Shared formatting utilities
pub mod fmt;
/// Recorded scan history
pub mod history;
/// Infrastructure traits for filesystem and keyed persistence
pub mod infra;
/// Advanced scan options and their persistence
pub mod options;
/// Console and JSON rendering
pub mod report;
