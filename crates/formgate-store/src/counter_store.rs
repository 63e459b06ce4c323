//! Counter store: the single persisted [`QuotaCounter`].

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use formgate_types::{QuotaCounter, Result};
use tracing::debug;

use crate::{
    lock,
    persist::{read_if_exists, write_atomic},
};

const STORE: &str = "counter store";

/// Durable single-row counter. Last write wins; there is no versioning.
pub trait CounterStore: Send + Sync {
    /// The stored counter, or the store's default if none was written yet.
    fn read(&self) -> Result<QuotaCounter>;

    /// Replace the stored counter.
    fn write(&self, counter: &QuotaCounter) -> Result<()>;
}

// ---------------------------------------------------------------------------
// MemoryCounterStore
// ---------------------------------------------------------------------------

/// In-process counter store.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    counter: Mutex<QuotaCounter>,
}

impl MemoryCounterStore {
    #[must_use]
    pub fn new(counter: QuotaCounter) -> Self {
        Self {
            counter: Mutex::new(counter),
        }
    }
}

impl CounterStore for MemoryCounterStore {
    fn read(&self) -> Result<QuotaCounter> {
        Ok(*lock(&self.counter, STORE)?)
    }

    fn write(&self, counter: &QuotaCounter) -> Result<()> {
        *lock(&self.counter, STORE)? = *counter;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// FileCounterStore
// ---------------------------------------------------------------------------

/// Counter kept as a small JSON document: `{"count":N,"max_submissions":M}`.
///
/// A missing file reads as `initial` and is only created by the first write.
#[derive(Debug)]
pub struct FileCounterStore {
    path: PathBuf,
    initial: QuotaCounter,
    lock: Mutex<()>,
}

impl FileCounterStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, initial: QuotaCounter) -> Self {
        Self {
            path: path.into(),
            initial,
            lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CounterStore for FileCounterStore {
    fn read(&self) -> Result<QuotaCounter> {
        let _guard = lock(&self.lock, STORE)?;
        match read_if_exists(&self.path)? {
            Some(bytes) => Ok(serde_json::from_slice(&bytes)?),
            None => {
                debug!(path = %self.path.display(), "no counter file, using initial counter");
                Ok(self.initial)
            }
        }
    }

    fn write(&self, counter: &QuotaCounter) -> Result<()> {
        let _guard = lock(&self.lock, STORE)?;
        write_atomic(&self.path, &serde_json::to_vec(counter)?)
    }
}

#[cfg(test)]
mod tests {
    use formgate_types::FormgateError;

    use super::*;

    #[test]
    fn memory_store_last_write_wins() {
        let store = MemoryCounterStore::default();
        assert_eq!(store.read().unwrap(), QuotaCounter::default());
        store.write(&QuotaCounter { count: 3, max_submissions: 10 }).unwrap();
        store.write(&QuotaCounter { count: 5, max_submissions: 10 }).unwrap();
        assert_eq!(store.read().unwrap().count, 5);
    }

    #[test]
    fn file_store_missing_reads_initial_without_creating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.json");
        let store = FileCounterStore::new(&path, QuotaCounter::with_max(4));
        assert_eq!(store.read().unwrap(), QuotaCounter::with_max(4));
        assert!(!path.exists());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.json");
        FileCounterStore::new(&path, QuotaCounter::default())
            .write(&QuotaCounter { count: 6, max_submissions: 10 })
            .unwrap();

        let again = FileCounterStore::new(&path, QuotaCounter::default());
        assert_eq!(again.read().unwrap(), QuotaCounter { count: 6, max_submissions: 10 });
    }

    #[test]
    fn file_store_writes_original_json_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.json");
        let store = FileCounterStore::new(&path, QuotaCounter::default());
        store.write(&QuotaCounter { count: 2, max_submissions: 10 }).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json, serde_json::json!({"count": 2, "max_submissions": 10}));
    }

    #[test]
    fn file_store_garbage_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("counter.json");
        std::fs::write(&path, b"not json").unwrap();
        let err = FileCounterStore::new(&path, QuotaCounter::default()).read().unwrap_err();
        assert!(matches!(err, FormgateError::Serialization(_)));
    }
}
