//! # formgate-ingress
//!
//! **Intake Envelope**: everything a submission must pass before it is
//! allowed anywhere near the record store.
//!
//! ## Architecture
//!
//! 1. **QuotaGate**: hard gate — rejects every submission while the counter is CLOSED
//! 2. **validation**: pure per-field predicates returning tagged results
//! 3. **SubmissionValidator**: applies the predicates in a fixed order and
//!    produces a [`NewSubmission`](formgate_types::NewSubmission)
//!
//! ## Submission Flow
//!
//! ```text
//! API → QuotaGate.check() → SubmissionValidator.validate() → RecordStore
//! ```
//!
//! The gate always runs first: a closed quota wins over any field error.

pub mod quota_gate;
pub mod validation;

pub use quota_gate::QuotaGate;
pub use validation::SubmissionValidator;
