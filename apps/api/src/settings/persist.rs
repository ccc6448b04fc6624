//! Key-value persistence backend for store state.
//!
//! The store sees an opaque string-keyed blob store. The default backend
//! keeps one JSON file per key under the configured data directory, written
//! atomically (tempfile + rename) so a crash mid-write never leaves a
//! half-serialized blob for the next hydration to choke on.
//!
//! Persistence failures are recoverable by contract: they are logged and
//! swallowed, never surfaced to the mutation that triggered them.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use std::collections::HashMap;

use tracing::warn;

/// Synchronous string key-value storage. `load` returns `None` for a missing
/// or unreadable key; `save` is best-effort.
pub trait StateStore: Send {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&self, key: &str, value: &str);
}

// ────────────────────────────────────────────────────────────────────────────
// File-backed store
// ────────────────────────────────────────────────────────────────────────────

/// One `<key>.json` file per key under `dir`.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates the data directory if needed. Creation failure is deferred:
    /// the store still constructs and every `save` will warn.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(e) = fs::create_dir_all(&dir) {
            warn!("could not create data directory {}: {e}", dir.display());
        }
        FileStore { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StateStore for FileStore {
    fn load(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn save(&self, key: &str, value: &str) {
        let path = self.path_for(key);
        let result = tempfile::NamedTempFile::new_in(&self.dir)
            .and_then(|file| {
                fs::write(file.path(), value)?;
                file.persist(&path).map_err(|e| e.error)
            })
            .map(|_| ());
        if let Err(e) = result {
            warn!("could not persist {}: {e}", path.display());
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory store
// ────────────────────────────────────────────────────────────────────────────

/// HashMap-backed store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeds a key, e.g. to simulate a legacy persisted blob.
    pub fn seeded(entries: &[(&str, &str)]) -> Self {
        let store = Self::new();
        for (key, value) in entries {
            store.save(key, value);
        }
        store
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn save(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("resume-data"), None);
        store.save("resume-data", "{}");
        assert_eq!(store.load("resume-data"), Some("{}".to_string()));
    }

    #[test]
    fn test_memory_store_seeded() {
        let store = MemoryStore::seeded(&[("k", "v")]);
        assert_eq!(store.load("k"), Some("v".to_string()));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.load("resume-global-settings"), None);
        store.save("resume-global-settings", r#"{"margin":{"top":48}}"#);
        assert_eq!(
            store.load("resume-global-settings"),
            Some(r#"{"margin":{"top":48}}"#.to_string())
        );
    }

    #[test]
    fn test_file_store_overwrites_atomically() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.save("k", "first");
        store.save("k", "second");
        assert_eq!(store.load("k"), Some("second".to_string()));
        // Only the key file remains; no stray temp files.
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("k.json")]);
    }
}
