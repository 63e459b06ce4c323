//! # formgate-core
//!
//! The [`SubmissionService`]: the only entry point to the quota counter and
//! the record table.
//!
//! ## Submit Flow
//!
//! ```text
//! CounterStore.read() → QuotaGate.check() → SubmissionValidator.validate()
//!     → RecordStore.append() → CounterStore.write(count + 1)
//! ```
//!
//! ## Known limitation
//!
//! The quota check and the two writes are separate steps against two
//! separately persisted stores. Without the `serialized-submit` feature,
//! concurrent submits can all pass the check and push the count past the
//! maximum by the number of requests admitted together. A record whose
//! counter write fails stays stored; the failure is returned to the caller
//! and logged, not rolled back.

pub mod service;

pub use service::{Accepted, FileSubmissionService, SubmissionService};
