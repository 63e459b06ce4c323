//! # formgate-store
//!
//! **Persistence**: the two independently durable resources behind the
//! intake endpoint.
//!
//! ## Architecture
//!
//! 1. **RecordStore**: append-only table of accepted submissions. `append`
//!    assigns `id = stored rows + 1`.
//! 2. **CounterStore**: single-row quota counter, last write wins.
//!
//! Each store serializes its own reads and writes, and nothing more. There
//! is no transaction spanning both stores: a record can land while the
//! following counter write fails, and callers see that failure as-is.
//!
//! Both stores come with an in-memory backend (tests, embedding) and a
//! file backend (JSON documents written via temp-file + rename).

use std::sync::{Mutex, MutexGuard};

use formgate_types::{FormgateError, Result};

pub mod counter_store;
mod persist;
pub mod record_store;
pub mod table;

pub use counter_store::{CounterStore, FileCounterStore, MemoryCounterStore};
pub use record_store::{FileRecordStore, MemoryRecordStore, RecordStore};
pub use table::{SubmissionRow, SubmissionTable};

/// Take a store's lock, reporting poisoning as an internal error naming
/// the store.
pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, store: &str) -> Result<MutexGuard<'a, T>> {
    mutex
        .lock()
        .map_err(|_| FormgateError::Internal(format!("{store} lock poisoned")))
}
