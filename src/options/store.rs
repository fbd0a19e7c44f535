//! Scan option persistence (I/O)
//!
//! The store never fails outward. A missing or malformed record yields the
//! defaults, and an unavailable backend degrades to memory for the session.

use super::{ScanOptions, ScanOptionsPatch};
use crate::error::OobeeError;
use crate::events::{EventObserver, NoOpObserver, OobeeEvent};
use crate::infra::KeyValueStore;
use log::{debug, warn};
use parking_lot::Mutex;
use std::sync::Arc;

/// Storage key of the persisted options record
pub const SCAN_OPTIONS_KEY: &str = "oobee.scanOptions";

/// Where a `save` ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Written to the backing store
    Persisted,
    /// Backing store failed; kept in memory for this session only
    SessionOnly,
}

#[derive(Debug, Default)]
struct StoreState {
    /// Last-known-good options
    current: ScanOptions,
    /// Set after a storage failure, cleared by the next successful access
    degraded: bool,
    /// Set once `current` reflects a read record or a save
    loaded: bool,
}

/// Handles scan option persistence across sessions
pub struct ScanConfigStore<S: KeyValueStore> {
    store: S,
    key: String,
    observer: Arc<dyn EventObserver>,
    state: Mutex<StoreState>,
}

impl<S: KeyValueStore> ScanConfigStore<S> {
    /// Create a store over `store` without touching it. The in-memory state
    /// starts at the defaults until `load` runs; `update` loads first if
    /// needed.
    pub fn new(store: S) -> Self {
        Self::with_observer(store, Arc::new(NoOpObserver))
    }

    /// Create a store that reports to `observer`
    pub fn with_observer(store: S, observer: Arc<dyn EventObserver>) -> Self {
        Self {
            store,
            key: SCAN_OPTIONS_KEY.to_string(),
            observer,
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Create a store and immediately load the persisted record
    pub fn open(store: S) -> Self {
        let this = Self::new(store);
        this.load();
        this
    }

    /// Use a different storage key
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Last-known-good options held in memory
    pub fn current(&self) -> ScanOptions {
        self.state.lock().current
    }

    /// True after a storage failure until storage works again
    pub fn is_degraded(&self) -> bool {
        self.state.lock().degraded
    }

    /// Read the persisted options.
    ///
    /// An absent or malformed record yields `ScanOptions::default()`. When
    /// the backend itself fails, the in-memory last-known-good value is
    /// returned instead.
    pub fn load(&self) -> ScanOptions {
        let raw = match self.store.get(&self.key) {
            Ok(raw) => raw,
            Err(source) => {
                let err = OobeeError::StorageUnavailable {
                    key: self.key.clone(),
                    source,
                };
                return self.degrade(err);
            }
        };

        let options = match raw {
            None => {
                debug!("No stored options under '{}', using defaults", self.key);
                self.notify(OobeeEvent::FellBackToDefaults {
                    key: self.key.clone(),
                    reason: "no record".to_string(),
                });
                ScanOptions::default()
            }
            Some(raw) => match decode_record(&self.key, &raw) {
                Ok(options) => {
                    self.notify(OobeeEvent::OptionsLoaded {
                        key: self.key.clone(),
                    });
                    options
                }
                Err(err) => {
                    warn!("{}: {}; using defaults", err, error_source(&err));
                    self.notify(OobeeEvent::FellBackToDefaults {
                        key: self.key.clone(),
                        reason: error_source(&err),
                    });
                    ScanOptions::default()
                }
            },
        };

        let mut state = self.state.lock();
        state.current = options;
        state.degraded = false;
        state.loaded = true;
        options
    }

    /// Persist the full configuration, overwriting any prior record.
    ///
    /// A single write is attempted. On failure the error is logged and
    /// swallowed and `options` still becomes the in-memory state.
    pub fn save(&self, options: ScanOptions) -> SaveOutcome {
        let result = encode_record(&options)
            .and_then(|contents| self.store.set(&self.key, &contents));

        match result {
            Ok(()) => {
                let mut state = self.state.lock();
                state.current = options;
                state.degraded = false;
                state.loaded = true;
                drop(state);
                debug!("Saved scan options under '{}'", self.key);
                self.notify(OobeeEvent::OptionsSaved {
                    key: self.key.clone(),
                });
                SaveOutcome::Persisted
            }
            Err(source) => {
                let mut state = self.state.lock();
                state.current = options;
                state.loaded = true;
                drop(state);
                self.degrade(OobeeError::StorageUnavailable {
                    key: self.key.clone(),
                    source,
                });
                SaveOutcome::SessionOnly
            }
        }
    }

    /// Field-wise override of `current` by `partial`. Pure.
    pub fn merge(&self, current: &ScanOptions, partial: &ScanOptionsPatch) -> ScanOptions {
        current.merge(partial)
    }

    /// Merge `partial` onto the last-known-good options and save the result.
    ///
    /// A store that has not read its record yet loads it first, so a fresh
    /// session never merges onto the defaults in place of a saved record.
    pub fn update(&self, partial: &ScanOptionsPatch) -> ScanOptions {
        let loaded = self.state.lock().loaded;
        if !loaded {
            self.load();
        }
        let merged = self.merge(&self.current(), partial);
        self.save(merged);
        merged
    }

    /// Save and return the defaults
    pub fn reset(&self) -> ScanOptions {
        let defaults = ScanOptions::default();
        self.save(defaults);
        defaults
    }

    fn degrade(&self, err: OobeeError) -> ScanOptions {
        warn!(
            "{}: {}; continuing with in-memory options",
            err,
            error_source(&err)
        );
        self.notify(OobeeEvent::StorageDegraded {
            key: self.key.clone(),
            reason: error_source(&err),
        });
        let mut state = self.state.lock();
        state.degraded = true;
        state.current
    }

    fn notify(&self, event: OobeeEvent) {
        self.observer.notify(&event);
    }
}

/// Decode a persisted record. Only a JSON object is accepted.
pub fn decode_record(key: &str, raw: &str) -> Result<ScanOptions, OobeeError> {
    let to_error = |source| OobeeError::ConfigParse {
        key: key.to_string(),
        source,
    };

    let value: serde_json::Value = serde_json::from_str(raw).map_err(to_error)?;
    if !value.is_object() {
        return Err(to_error(serde::de::Error::custom(
            "expected a JSON object",
        )));
    }
    serde_json::from_value(value).map_err(to_error)
}

fn encode_record(options: &ScanOptions) -> std::io::Result<String> {
    serde_json::to_string(options).map_err(std::io::Error::other)
}

fn error_source(err: &OobeeError) -> String {
    std::error::Error::source(err)
        .map(|s| s.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MemoryObserver;
    use crate::infra::{FileKeyValueStore, MemoryKeyValueStore};
    use crate::options::Viewport;
    use proptest::prelude::*;
    use std::io;
    use tempfile::TempDir;

    // Mock store that fails reads or writes independently
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryKeyValueStore,
        fail_get: bool,
        fail_set: bool,
        set_calls: Mutex<usize>,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> io::Result<Option<String>> {
            if self.fail_get {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
            }
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> io::Result<()> {
            *self.set_calls.lock() += 1;
            if self.fail_set {
                return Err(io::Error::new(io::ErrorKind::StorageFull, "quota exceeded"));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> io::Result<bool> {
            self.inner.remove(key)
        }
    }

    fn mobile_with_screenshots() -> ScanOptions {
        ScanOptions {
            viewport: Viewport::Mobile,
            include_screenshots: true,
            ..ScanOptions::default()
        }
    }

    #[test]
    fn test_load_without_record_returns_defaults() {
        let store = ScanConfigStore::new(MemoryKeyValueStore::new());
        assert_eq!(store.load(), ScanOptions::default());
        assert!(!store.is_degraded());
    }

    #[test]
    fn test_save_then_load_returns_saved_options() {
        let backend = MemoryKeyValueStore::new();
        let store = ScanConfigStore::new(backend.clone());

        assert_eq!(store.save(mobile_with_screenshots()), SaveOutcome::Persisted);

        // A fresh store over the same backend models the next session
        let next_session = ScanConfigStore::new(backend);
        assert_eq!(next_session.load(), mobile_with_screenshots());
    }

    #[test]
    fn test_load_with_invalid_json_returns_exact_defaults() {
        let backend = MemoryKeyValueStore::new();
        backend.insert_raw(SCAN_OPTIONS_KEY, "{invalid json, missing bracket");
        let store = ScanConfigStore::new(backend);

        assert_eq!(store.load(), ScanOptions::default());
        assert!(!store.is_degraded());
    }

    #[test]
    fn test_load_with_non_object_record_returns_defaults() {
        for raw in ["null", "[]", "[true, false]", "42", "\"mobile\""] {
            let backend = MemoryKeyValueStore::new();
            backend.insert_raw(SCAN_OPTIONS_KEY, raw);
            let store = ScanConfigStore::new(backend);
            assert_eq!(store.load(), ScanOptions::default(), "record {:?}", raw);
        }
    }

    #[test]
    fn test_load_with_wrong_field_type_returns_defaults() {
        let backend = MemoryKeyValueStore::new();
        backend.insert_raw(SCAN_OPTIONS_KEY, r#"{"viewport": 5}"#);
        let store = ScanConfigStore::new(backend);

        assert_eq!(store.load(), ScanOptions::default());
    }

    #[test]
    fn test_load_with_partial_record_defaults_missing_fields() {
        let backend = MemoryKeyValueStore::new();
        backend.insert_raw(
            SCAN_OPTIONS_KEY,
            r#"{"customChecks": true, "legacyFlag": 1}"#,
        );
        let store = ScanConfigStore::new(backend);

        let loaded = store.load();
        assert!(loaded.custom_checks);
        assert_eq!(loaded.viewport, Viewport::Desktop);
    }

    #[test]
    fn test_load_with_unavailable_storage_returns_in_memory_state() {
        let backend = MemoryKeyValueStore::new();
        let store = ScanConfigStore::new(backend.clone());
        store.save(mobile_with_screenshots());

        backend.set_unavailable(true);

        assert_eq!(store.load(), mobile_with_screenshots());
        assert!(store.is_degraded());
    }

    #[test]
    fn test_save_with_failing_storage_keeps_session_state() {
        let flaky = FlakyStore {
            fail_set: true,
            ..FlakyStore::default()
        };
        let store = ScanConfigStore::new(flaky);

        let outcome = store.save(mobile_with_screenshots());

        assert_eq!(outcome, SaveOutcome::SessionOnly);
        assert!(store.is_degraded());
        assert_eq!(store.current(), mobile_with_screenshots());
    }

    #[test]
    fn test_save_with_failing_storage_attempts_exactly_once() {
        let flaky = FlakyStore {
            fail_set: true,
            ..FlakyStore::default()
        };
        let store = ScanConfigStore::new(flaky);

        store.save(mobile_with_screenshots());
        assert_eq!(*store.store.set_calls.lock(), 1);
    }

    #[test]
    fn test_load_with_failing_reads_starts_from_defaults() {
        let flaky = FlakyStore {
            fail_get: true,
            ..FlakyStore::default()
        };
        let store = ScanConfigStore::new(flaky);

        assert_eq!(store.load(), ScanOptions::default());
        assert!(store.is_degraded());
    }

    #[test]
    fn test_successful_save_clears_degraded_flag() {
        let backend = MemoryKeyValueStore::new();
        let store = ScanConfigStore::new(backend.clone());

        backend.set_unavailable(true);
        store.save(mobile_with_screenshots());
        assert!(store.is_degraded());

        backend.set_unavailable(false);
        assert_eq!(store.save(mobile_with_screenshots()), SaveOutcome::Persisted);
        assert!(!store.is_degraded());
    }

    #[test]
    fn test_update_merges_onto_last_known_good_not_defaults() {
        let backend = MemoryKeyValueStore::new();
        let store = ScanConfigStore::new(backend.clone());
        store.save(mobile_with_screenshots());

        let updated = store.update(&ScanOptionsPatch::new().enable_wcag_aaa(true));

        assert_eq!(updated.viewport, Viewport::Mobile);
        assert!(updated.include_screenshots);
        assert!(updated.enable_wcag_aaa);
        assert_eq!(ScanConfigStore::new(backend).load(), updated);
    }

    #[test]
    fn test_update_on_fresh_store_keeps_saved_fields() {
        let backend = MemoryKeyValueStore::new();
        ScanConfigStore::new(backend.clone()).save(mobile_with_screenshots());

        // Not opened: nothing read yet
        let next_session = ScanConfigStore::new(backend.clone());
        let updated = next_session.update(&ScanOptionsPatch::new().custom_checks(true));

        assert_eq!(updated.viewport, Viewport::Mobile);
        assert!(updated.include_screenshots);
        assert!(updated.custom_checks);
        assert_eq!(ScanConfigStore::new(backend).load(), updated);
    }

    #[test]
    fn test_update_on_fresh_store_with_unavailable_storage_uses_defaults() {
        let backend = MemoryKeyValueStore::new();
        backend.set_unavailable(true);
        let store = ScanConfigStore::new(backend);

        let updated = store.update(&ScanOptionsPatch::new().viewport(Viewport::Mobile));

        assert_eq!(
            updated,
            ScanOptions {
                viewport: Viewport::Mobile,
                ..ScanOptions::default()
            }
        );
        assert!(store.is_degraded());
    }

    #[test]
    fn test_update_after_corrupt_record_merges_onto_defaults() {
        let backend = MemoryKeyValueStore::new();
        backend.insert_raw(SCAN_OPTIONS_KEY, "not json");
        let store = ScanConfigStore::open(backend);

        let updated = store.update(&ScanOptionsPatch::new().custom_checks(true));
        assert_eq!(
            updated,
            ScanOptions {
                custom_checks: true,
                ..ScanOptions::default()
            }
        );
    }

    #[test]
    fn test_update_while_degraded_continues_in_memory() {
        let backend = MemoryKeyValueStore::new();
        let store = ScanConfigStore::open(backend.clone());
        backend.set_unavailable(true);

        store.update(&ScanOptionsPatch::new().viewport(Viewport::Mobile));
        let second = store.update(&ScanOptionsPatch::new().include_subdomains(true));

        assert_eq!(second.viewport, Viewport::Mobile);
        assert!(second.include_subdomains);
        assert_eq!(backend.raw(SCAN_OPTIONS_KEY), None);
    }

    #[test]
    fn test_merge_with_empty_patch_returns_current() {
        let store = ScanConfigStore::new(MemoryKeyValueStore::new());
        let current = mobile_with_screenshots();
        assert_eq!(store.merge(&current, &ScanOptionsPatch::new()), current);
    }

    #[test]
    fn test_reset_persists_defaults() {
        let backend = MemoryKeyValueStore::new();
        let store = ScanConfigStore::new(backend.clone());
        store.save(mobile_with_screenshots());

        assert_eq!(store.reset(), ScanOptions::default());
        assert_eq!(ScanConfigStore::new(backend).load(), ScanOptions::default());
    }

    #[test]
    fn test_saved_record_is_flat_json_object() {
        let backend = MemoryKeyValueStore::new();
        let store = ScanConfigStore::new(backend.clone());
        store.save(mobile_with_screenshots());

        let raw = backend.raw(SCAN_OPTIONS_KEY).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 6);
        assert!(object.values().all(|v| !v.is_object() && !v.is_array()));
    }

    #[test]
    fn test_custom_key_is_used_for_storage() {
        let backend = MemoryKeyValueStore::new();
        let store = ScanConfigStore::new(backend.clone()).with_key("profile-2.options");
        store.save(mobile_with_screenshots());

        assert_eq!(store.key(), "profile-2.options");
        assert!(backend.raw("profile-2.options").is_some());
        assert!(backend.raw(SCAN_OPTIONS_KEY).is_none());
    }

    #[test]
    fn test_observer_sees_load_save_and_fallback_events() {
        let backend = MemoryKeyValueStore::new();
        let observer = MemoryObserver::new();
        let store = ScanConfigStore::with_observer(backend.clone(), Arc::new(observer.clone()));

        store.load();
        store.save(mobile_with_screenshots());
        store.load();
        backend.set_unavailable(true);
        store.save(ScanOptions::default());

        assert_eq!(
            observer.names(),
            vec![
                "fell_back_to_defaults",
                "options_saved",
                "options_loaded",
                "storage_degraded",
            ]
        );
    }

    #[test]
    fn test_file_backed_store_survives_reopen() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let dir = temp_dir.path().join(".oobee");

        let store = ScanConfigStore::new(FileKeyValueStore::new(&dir));
        store.save(mobile_with_screenshots());

        let reopened = ScanConfigStore::open(FileKeyValueStore::new(&dir));
        assert_eq!(reopened.current(), mobile_with_screenshots());
    }

    #[test]
    fn test_file_backed_store_with_corrupt_file_returns_defaults() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        std::fs::write(
            temp_dir.path().join("oobee.scanOptions.json"),
            "{\"viewport\": \"mobile\"",
        )
        .unwrap();

        let store = ScanConfigStore::new(FileKeyValueStore::new(temp_dir.path()));
        assert_eq!(store.load(), ScanOptions::default());
    }

    #[test]
    fn test_decode_record_reports_key_in_error() {
        let err = decode_record("oobee.scanOptions", "{").unwrap_err();
        assert!(err.to_string().contains("oobee.scanOptions"));
        assert!(err.is_recoverable());
    }

    fn arb_options() -> impl Strategy<Value = ScanOptions> {
        (any::<bool>(), any::<[bool; 4]>()).prop_map(|(mobile, flags)| ScanOptions {
            scan_type: crate::options::ScanType::WebsiteCrawl,
            viewport: if mobile {
                Viewport::Mobile
            } else {
                Viewport::Desktop
            },
            include_screenshots: flags[0],
            include_subdomains: flags[1],
            enable_wcag_aaa: flags[2],
            custom_checks: flags[3],
        })
    }

    proptest! {
        /// Property: load after save returns the saved value
        #[test]
        fn prop_save_then_load_round_trips(options in arb_options()) {
            let backend = MemoryKeyValueStore::new();
            ScanConfigStore::new(backend.clone()).save(options);
            prop_assert_eq!(ScanConfigStore::new(backend).load(), options);
        }

        /// Property: load never panics on arbitrary record contents
        #[test]
        fn prop_load_is_total_over_arbitrary_records(raw in ".*") {
            let backend = MemoryKeyValueStore::new();
            backend.insert_raw(SCAN_OPTIONS_KEY, &raw);
            let _ = ScanConfigStore::new(backend).load();
        }
    }
}
