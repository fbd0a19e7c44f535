//! Infrastructure traits for abstracting I/O operations.
//!
//! This module provides trait abstractions for filesystem access and keyed
//! persistence, so the option store and snapshot history can run against a
//! directory on disk, an in-memory map, or a test double.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Trait for abstracting filesystem operations.
///
/// This trait allows for dependency injection of filesystem operations,
/// making code more testable and allowing for alternative implementations
/// (e.g., in-memory filesystems for testing, read-only media, etc.).
pub trait FileSystem {
    /// Create a directory and all missing parent directories.
    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Read the entire contents of a file into a string.
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write a slice of bytes to a file.
    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()>;

    /// Remove a file.
    fn remove_file(&self, path: &Path) -> io::Result<()>;
}

/// Real filesystem implementation that delegates to std::fs.
#[derive(Debug, Clone, Copy)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        std::fs::create_dir_all(path)
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        std::fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: impl AsRef<[u8]>) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn remove_file(&self, path: &Path) -> io::Result<()> {
        std::fs::remove_file(path)
    }
}

/// Keyed string persistence.
///
/// One slot per key, last writer wins. This is the capability the option
/// store and the snapshot history are written against; a browser's local
/// storage, a directory of files and a plain map all fit behind it.
pub trait KeyValueStore {
    /// Read the value stored under `key`, `None` if the slot is empty.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Clear the slot. Returns whether a value was present.
    fn remove(&self, key: &str) -> io::Result<bool>;
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore<FS: FileSystem = RealFileSystem> {
    dir: PathBuf,
    fs: FS,
}

impl FileKeyValueStore<RealFileSystem> {
    /// Create a store rooted at `dir` on the real filesystem
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self::with_fs(dir, RealFileSystem)
    }
}

impl<FS: FileSystem> FileKeyValueStore<FS> {
    /// Create a store with a custom filesystem implementation
    pub fn with_fs(dir: impl Into<PathBuf>, fs: FS) -> Self {
        Self {
            dir: dir.into(),
            fs,
        }
    }

    /// Directory holding the records
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> io::Result<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl<FS: FileSystem> KeyValueStore for FileKeyValueStore<FS> {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let path = self.path_for(key)?;
        // Read directly; a missing file is an empty slot
        match self.fs.read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let path = self.path_for(key)?;
        self.fs.create_dir_all(&self.dir)?;
        self.fs.write(&path, value)
    }

    fn remove(&self, key: &str) -> io::Result<bool> {
        let path = self.path_for(key)?;
        match self.fs.remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Keys become file names, so they are restricted to a safe alphabet.
fn validate_key(key: &str) -> io::Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid storage key '{}'", key),
        ))
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    unavailable: bool,
}

/// Process-local store. Clones share the same slots.
///
/// Can be switched into an unavailable mode where every operation fails,
/// which is how disabled or over-quota storage is simulated.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryKeyValueStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent operation fail (or succeed again)
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state.lock().unavailable = unavailable;
    }

    /// Write a raw value, bypassing the availability switch
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.state
            .lock()
            .entries
            .insert(key.to_string(), value.to_string());
    }

    /// Read a raw value, bypassing the availability switch
    pub fn raw(&self, key: &str) -> Option<String> {
        self.state.lock().entries.get(key).cloned()
    }

    fn check(state: &MemoryState) -> io::Result<()> {
        if state.unavailable {
            Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "storage is disabled",
            ))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        let state = self.state.lock();
        Self::check(&state)?;
        Ok(state.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        let mut state = self.state.lock();
        Self::check(&state)?;
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<bool> {
        let mut state = self.state.lock();
        Self::check(&state)?;
        Ok(state.entries.remove(key).is_some())
    }
}
