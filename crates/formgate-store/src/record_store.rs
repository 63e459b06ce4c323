//! Record store: the append-only table of accepted submissions.

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use formgate_types::{NewSubmission, Result, Submission};
use tracing::{debug, info};

use crate::{
    lock,
    persist::{read_if_exists, write_atomic},
    table::SubmissionTable,
};

/// Durable append-only table of submissions.
pub trait RecordStore: Send + Sync {
    /// Store `new` under id = (stored rows + 1) and return the stored record.
    fn append(&self, new: NewSubmission) -> Result<Submission>;

    /// Every stored record, ascending by id.
    fn list_all(&self) -> Result<Vec<Submission>>;

    /// Number of stored records.
    fn len(&self) -> Result<usize>;

    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// The raw stored table, or `None` if nothing has been persisted yet.
    fn export(&self) -> Result<Option<Vec<u8>>>;
}

const STORE: &str = "record store";

// ---------------------------------------------------------------------------
// MemoryRecordStore
// ---------------------------------------------------------------------------

/// In-process record store.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    table: Mutex<SubmissionTable>,
}

impl MemoryRecordStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryRecordStore {
    fn append(&self, new: NewSubmission) -> Result<Submission> {
        Ok(lock(&self.table, STORE)?.push(new))
    }

    fn list_all(&self) -> Result<Vec<Submission>> {
        lock(&self.table, STORE)?.submissions()
    }

    fn len(&self) -> Result<usize> {
        Ok(lock(&self.table, STORE)?.len())
    }

    fn export(&self) -> Result<Option<Vec<u8>>> {
        lock(&self.table, STORE)?.to_vec().map(Some)
    }
}

// ---------------------------------------------------------------------------
// FileRecordStore
// ---------------------------------------------------------------------------

/// Record table kept as one JSON document on disk.
///
/// Every operation re-reads the file, so the document is the only source of
/// truth. The in-process lock serializes each read-modify-write; it does not
/// protect against other processes writing the same file.
#[derive(Debug)]
pub struct FileRecordStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileRecordStore {
    /// Open the table at `path`, creating it with just the header if absent.
    /// Opening an existing table verifies its header and leaves it untouched.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        match read_if_exists(&path)? {
            Some(bytes) => {
                let table = SubmissionTable::from_slice(&bytes)?;
                debug!(path = %path.display(), rows = table.len(), "opened record table");
            }
            None => {
                write_atomic(&path, &SubmissionTable::new().to_vec()?)?;
                info!(path = %path.display(), "created record table");
            }
        }
        Ok(Self {
            path,
            lock: Mutex::new(()),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<SubmissionTable> {
        match read_if_exists(&self.path)? {
            Some(bytes) => SubmissionTable::from_slice(&bytes),
            None => Ok(SubmissionTable::new()),
        }
    }
}

impl RecordStore for FileRecordStore {
    fn append(&self, new: NewSubmission) -> Result<Submission> {
        let _guard = lock(&self.lock, STORE)?;
        let mut table = self.load()?;
        let submission = table.push(new);
        write_atomic(&self.path, &table.to_vec()?)?;
        Ok(submission)
    }

    fn list_all(&self) -> Result<Vec<Submission>> {
        let _guard = lock(&self.lock, STORE)?;
        self.load()?.submissions()
    }

    fn len(&self) -> Result<usize> {
        let _guard = lock(&self.lock, STORE)?;
        Ok(self.load()?.len())
    }

    fn export(&self) -> Result<Option<Vec<u8>>> {
        let _guard = lock(&self.lock, STORE)?;
        read_if_exists(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use formgate_types::{FormgateError, RobotType, SubmissionId};

    use super::*;

    fn new_submission(name: &str) -> NewSubmission {
        NewSubmission {
            name: name.into(),
            phone: "12345678".into(),
            email: "a@b.com".into(),
            school_name: "Springfield".into(),
            selected_robots: vec![RobotType::SecurityRobot],
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn memory_store_appends_in_order() {
        let store = MemoryRecordStore::new();
        assert!(store.is_empty().unwrap());
        store.append(new_submission("Ann")).unwrap();
        let b = store.append(new_submission("Bob")).unwrap();
        assert_eq!(b.id, SubmissionId(2));

        let all = store.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Ann");
        assert_eq!(all[1].name, "Bob");
    }

    #[test]
    fn file_store_creates_header_only_table() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.json");
        let store = FileRecordStore::open(&path).unwrap();

        assert!(path.exists());
        assert_eq!(store.len().unwrap(), 0);
        let table = SubmissionTable::from_slice(&store.export().unwrap().unwrap()).unwrap();
        assert_eq!(table, SubmissionTable::new());
    }

    #[test]
    fn file_store_reopen_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.json");

        let store = FileRecordStore::open(&path).unwrap();
        store.append(new_submission("Ann")).unwrap();
        drop(store);

        let reopened = FileRecordStore::open(&path).unwrap();
        assert_eq!(reopened.len().unwrap(), 1);
        let next = reopened.append(new_submission("Bob")).unwrap();
        assert_eq!(next.id, SubmissionId(2));
    }

    #[test]
    fn file_store_round_trips_records() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileRecordStore::open(dir.path().join("submissions.json")).unwrap();
        let stored = store.append(new_submission("Ann")).unwrap();
        assert_eq!(store.list_all().unwrap(), vec![stored]);
    }

    #[test]
    fn file_store_rejects_foreign_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.json");
        std::fs::write(&path, br#"{"columns":["x"],"rows":[]}"#).unwrap();
        let err = FileRecordStore::open(&path).unwrap_err();
        assert!(matches!(err, FormgateError::Storage(_)));
    }

    #[test]
    fn export_is_none_once_file_removed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("submissions.json");
        let store = FileRecordStore::open(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert!(store.export().unwrap().is_none());
    }
}
