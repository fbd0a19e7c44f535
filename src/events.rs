//! Observer side channel for analytics events
//!
//! Components that want to report what happened (options saved, storage
//! falling back, an AI helper suggestion being accepted) notify an injected
//! `EventObserver` instead of broadcasting process-wide.

use parking_lot::Mutex;
use std::sync::Arc;

/// Events reported by the option store, the history and the helper flow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OobeeEvent {
    /// Options were read back from storage
    OptionsLoaded {
        /// Storage key
        key: String,
    },
    /// Options were written to storage
    OptionsSaved {
        /// Storage key
        key: String,
    },
    /// Stored options were absent or unreadable and defaults were used
    FellBackToDefaults {
        /// Storage key
        key: String,
        /// Why the record could not be used
        reason: String,
    },
    /// Storage failed; the store keeps working from memory
    StorageDegraded {
        /// Storage key
        key: String,
        /// Underlying error message
        reason: String,
    },
    /// A snapshot was recorded in history
    SnapshotRecorded {
        /// Snapshot id
        id: String,
    },
    /// Two snapshots were compared
    ComparisonComputed {
        /// Earlier snapshot id
        from: String,
        /// Later snapshot id
        to: String,
        /// Verdict of the comparison
        is_improvement: bool,
    },
    /// A suggestion from the alt-text helper was accepted
    HelperAccepted {
        /// Snapshot the suggestion belongs to
        snapshot_id: String,
        /// Accepted suggestion text
        suggestion: String,
    },
}

impl OobeeEvent {
    /// Short stable name, used as the log target suffix
    pub fn name(&self) -> &'static str {
        match self {
            Self::OptionsLoaded { .. } => "options_loaded",
            Self::OptionsSaved { .. } => "options_saved",
            Self::FellBackToDefaults { .. } => "fell_back_to_defaults",
            Self::StorageDegraded { .. } => "storage_degraded",
            Self::SnapshotRecorded { .. } => "snapshot_recorded",
            Self::ComparisonComputed { .. } => "comparison_computed",
            Self::HelperAccepted { .. } => "helper_accepted",
        }
    }
}

/// Trait for pluggable event observers
pub trait EventObserver: Send + Sync {
    /// Observer name
    fn name(&self) -> &str;

    /// Receive an event
    fn notify(&self, event: &OobeeEvent);

    /// Flush any buffered events
    fn flush(&self) {}
}

/// No-op observer (default)
pub struct NoOpObserver;

impl EventObserver for NoOpObserver {
    fn name(&self) -> &str {
        "noop"
    }

    fn notify(&self, _event: &OobeeEvent) {}
}

/// Routes events to the `log` facade at debug level
pub struct LogObserver;

impl EventObserver for LogObserver {
    fn name(&self) -> &str {
        "log"
    }

    fn notify(&self, event: &OobeeEvent) {
        log::debug!(target: "oobee::events", "{}: {:?}", event.name(), event);
    }
}

/// In-memory observer for testing
#[derive(Default, Clone)]
pub struct MemoryObserver {
    events: Arc<Mutex<Vec<OobeeEvent>>>,
}

impl MemoryObserver {
    /// Create a new memory observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded events
    pub fn events(&self) -> Vec<OobeeEvent> {
        self.events.lock().clone()
    }

    /// Names of recorded events, in order
    pub fn names(&self) -> Vec<&'static str> {
        self.events.lock().iter().map(OobeeEvent::name).collect()
    }

    /// Clear all recorded events
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventObserver for MemoryObserver {
    fn name(&self) -> &str {
        "memory"
    }

    fn notify(&self, event: &OobeeEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Report that the user accepted a helper suggestion
pub fn helper_accepted(
    observer: &dyn EventObserver,
    snapshot_id: impl Into<String>,
    suggestion: impl Into<String>,
) {
    observer.notify(&OobeeEvent::HelperAccepted {
        snapshot_id: snapshot_id.into(),
        suggestion: suggestion.into(),
    });
}
