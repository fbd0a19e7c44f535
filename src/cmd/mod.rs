//! Command handlers for the oobee CLI
//!
//! Each submodule handles a specific CLI command. Handlers share a
//! [`Project`], which resolves the config file and the storage directory
//! once per invocation.

pub mod compare;
pub mod completions;
pub mod init;
pub mod options;
pub mod rank;
pub mod snapshot;

pub use compare::cmd_compare;
pub use completions::cmd_completions;
pub use init::cmd_init;
pub use options::{cmd_options_reset, cmd_options_set, cmd_options_show};
pub use rank::cmd_rank;
pub use snapshot::{cmd_snapshot_add, cmd_snapshot_list};

use crate::config::{ConfigFile, ConfigLoader};
use crate::events::{EventObserver, LogObserver};
use crate::history::SnapshotHistory;
use crate::infra::FileKeyValueStore;
use crate::options::ScanConfigStore;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Resolved project context for one CLI invocation
pub struct Project {
    root: PathBuf,
    config: ConfigFile,
    observer: Arc<dyn EventObserver>,
}

impl Project {
    /// Load `.oobee.toml` from `root` (defaults when absent)
    pub fn open(root: &Path) -> Result<Self> {
        Ok(Self::with_config(root, ConfigLoader::load(root)?))
    }

    /// Use an already loaded config
    pub fn with_config(root: &Path, config: ConfigFile) -> Self {
        Self {
            root: root.to_path_buf(),
            config,
            observer: Arc::new(LogObserver),
        }
    }

    /// Project root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Effective configuration
    pub fn config(&self) -> &ConfigFile {
        &self.config
    }

    /// Observer that command handlers report events to
    pub fn observer(&self) -> &dyn EventObserver {
        self.observer.as_ref()
    }

    /// Key-value store rooted at the configured store directory
    pub fn store(&self) -> FileKeyValueStore {
        FileKeyValueStore::new(self.config.store_path(&self.root))
    }

    /// Option store with the persisted record loaded
    pub fn options(&self) -> ScanConfigStore<FileKeyValueStore> {
        let store = ScanConfigStore::with_observer(self.store(), Arc::clone(&self.observer));
        store.load();
        store
    }

    /// Recorded scan history
    pub fn history(&self) -> Result<SnapshotHistory> {
        SnapshotHistory::load(&self.store())
    }
}
