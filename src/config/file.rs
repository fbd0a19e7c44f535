//! Configuration file data structures

use crate::comparison::RankMetric;
use crate::error::OobeeError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = ".oobee.toml";

/// Accepted range for `history-limit`
pub const HISTORY_LIMIT_RANGE: std::ops::RangeInclusive<usize> = 1..=1000;

/// oobee project configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ConfigFile {
    /// Directory holding the option record and scan history, relative to
    /// the project root unless absolute
    pub store_dir: String,

    /// Number of snapshots kept in history
    pub history_limit: usize,

    /// Default metric for `oobee rank`
    pub rank_by: RankMetric,
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            store_dir: ".oobee".to_string(),
            history_limit: crate::history::SnapshotHistory::MAX_RECORDS,
            rank_by: RankMetric::default(),
        }
    }
}

impl ConfigFile {
    /// Check value ranges; `path` is only used for the error message
    pub fn validate(&self, path: &Path) -> Result<(), OobeeError> {
        if !HISTORY_LIMIT_RANGE.contains(&self.history_limit) {
            return Err(OobeeError::InvalidConfig {
                path: path.to_path_buf(),
                message: format!(
                    "history-limit must be between {} and {}, got {}",
                    HISTORY_LIMIT_RANGE.start(),
                    HISTORY_LIMIT_RANGE.end(),
                    self.history_limit
                ),
            });
        }

        if self.store_dir.trim().is_empty() {
            return Err(OobeeError::InvalidConfig {
                path: path.to_path_buf(),
                message: "store-dir must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Resolve the store directory against `project_root`
    pub fn store_path(&self, project_root: &Path) -> PathBuf {
        let dir = Path::new(&self.store_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            project_root.join(dir)
        }
    }
}
