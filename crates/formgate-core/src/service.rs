//! Submission service.
//!
//! Owns the two stores and applies the intake rules in a fixed order. The
//! quota check always precedes field validation: while the gate is CLOSED
//! every submit fails with `QuotaExceeded`, valid or not.

use std::fs;
#[cfg(feature = "serialized-submit")]
use std::sync::Mutex;

use chrono::Utc;
use formgate_ingress::{QuotaGate, SubmissionValidator};
use formgate_store::{CounterStore, FileCounterStore, FileRecordStore, RecordStore};
use formgate_types::{
    CounterSnapshot, FormgateConfig, FormgateError, QuotaConfig, QuotaCounter, Result, Submission,
    SubmissionPayload,
};
use serde::Serialize;
use tracing::{error, info, warn};

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Accepted {
    pub submission: Submission,
    /// Counter after this submission was counted.
    pub counter: CounterSnapshot,
}

/// The service backed by the on-disk stores.
pub type FileSubmissionService = SubmissionService<FileRecordStore, FileCounterStore>;

/// Validates, gates, and persists form submissions.
pub struct SubmissionService<R, C> {
    records: R,
    counter: C,
    gate: QuotaGate,
    validator: SubmissionValidator,
    reset_secret: String,
    #[cfg(feature = "serialized-submit")]
    serial: Mutex<()>,
}

impl<R: RecordStore, C: CounterStore> SubmissionService<R, C> {
    #[must_use]
    pub fn new(records: R, counter: C, quota: &QuotaConfig) -> Self {
        Self {
            records,
            counter,
            gate: QuotaGate::new(),
            validator: SubmissionValidator::new(),
            reset_secret: quota.reset_secret.clone(),
            #[cfg(feature = "serialized-submit")]
            serial: Mutex::new(()),
        }
    }

    /// Accept one submission.
    ///
    /// # Errors
    /// - `QuotaExceeded` if the gate is closed (checked first)
    /// - `Validation` for the first failing field rule
    /// - a storage error if either write fails; a failed counter write
    ///   leaves the already-appended record in place
    pub fn submit(&self, payload: &SubmissionPayload) -> Result<Accepted> {
        #[cfg(feature = "serialized-submit")]
        let _serial = self.serial_guard()?;

        // 1. Quota gate
        let counter = self.counter.read()?;
        self.check_gate(&counter)?;

        // 2. Field rules
        let new = self.validator.validate(payload, Utc::now()).map_err(|e| {
            warn!(field = e.field(), "submission rejected: {e}");
            FormgateError::from(e)
        })?;

        // 3. Persist record, then count it
        let submission = self.records.append(new)?;
        let updated = counter.incremented();
        if let Err(e) = self.counter.write(&updated) {
            error!(
                id = %submission.id,
                "record stored but counter write failed, counter now lags the table: {e}"
            );
            return Err(e);
        }

        info!(
            id = %submission.id,
            count = updated.count,
            max = updated.max_submissions,
            "submission accepted"
        );
        if updated.is_limit_reached() {
            info!(count = updated.count, "submission limit reached, intake closed");
        }

        Ok(Accepted {
            submission,
            counter: updated.snapshot(),
        })
    }

    /// Fail with `QuotaExceeded` if intake is closed, without looking at any
    /// payload. Used when a request body cannot even be read, so that a
    /// closed gate still wins over a malformed body.
    ///
    /// # Errors
    /// `QuotaExceeded` while the gate is closed, or a counter read error.
    pub fn ensure_open(&self) -> Result<CounterSnapshot> {
        let counter = self.counter.read()?;
        self.check_gate(&counter)?;
        Ok(counter.snapshot())
    }

    /// Current counter. Never mutates.
    pub fn status(&self) -> Result<CounterSnapshot> {
        Ok(self.counter.read()?.snapshot())
    }

    /// Every stored submission, ascending by id. Never mutates.
    pub fn list_submissions(&self) -> Result<Vec<Submission>> {
        self.records.list_all()
    }

    /// Zero the counter if `password` matches the reset secret exactly.
    ///
    /// # Errors
    /// `Unauthorized` on mismatch, with the counter left untouched.
    pub fn reset(&self, password: &str) -> Result<CounterSnapshot> {
        #[cfg(feature = "serialized-submit")]
        let _serial = self.serial_guard()?;

        if password != self.reset_secret {
            warn!("counter reset rejected: incorrect password");
            return Err(FormgateError::Unauthorized);
        }

        let previous = self.counter.read()?;
        let zeroed = previous.zeroed();
        self.counter.write(&zeroed)?;
        info!(previous = previous.count, "submission counter reset");
        Ok(zeroed.snapshot())
    }

    /// Raw bytes of the record table, `None` if nothing is stored yet.
    pub fn export(&self) -> Result<Option<Vec<u8>>> {
        self.records.export()
    }

    fn check_gate(&self, counter: &QuotaCounter) -> Result<()> {
        self.gate.check(counter).inspect_err(|_| {
            warn!(
                count = counter.count,
                max = counter.max_submissions,
                "submission rejected: limit reached"
            );
        })
    }

    #[cfg(feature = "serialized-submit")]
    fn serial_guard(&self) -> Result<std::sync::MutexGuard<'_, ()>> {
        self.serial
            .lock()
            .map_err(|_| FormgateError::Internal("submission lock poisoned".into()))
    }
}

impl FileSubmissionService {
    /// Open the on-disk stores under `config.data_dir`, creating the
    /// directory and an empty record table if needed.
    pub fn open(config: &FormgateConfig) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;
        let records = FileRecordStore::open(config.record_path())?;
        let counter = FileCounterStore::new(
            config.counter_path(),
            QuotaCounter::with_max(config.quota.max_submissions),
        );
        info!(data_dir = %config.data_dir.display(), "submission stores opened");
        Ok(Self::new(records, counter, &config.quota))
    }
}
