//! # formgate-types
//!
//! Shared types, errors, and configuration for **FormGate**, a quota-gated
//! form intake endpoint.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Submission model**: [`SubmissionPayload`], [`NewSubmission`], [`Submission`], [`RobotType`]
//! - **Quota model**: [`QuotaCounter`], [`CounterSnapshot`], [`QuotaState`]
//! - **Configuration**: [`FormgateConfig`], [`QuotaConfig`]
//! - **Errors**: [`FormgateError`] with `FG_ERR_` prefix codes, [`ValidationError`]
//! - **Constants**: fixed limits, secret, and file names

pub mod config;
pub mod constants;
pub mod counter;
pub mod error;
pub mod submission;

// Re-export all primary types at crate root for ergonomic imports:
//   use formgate_types::{Submission, QuotaCounter, FormgateError, ...};

pub use config::*;
pub use counter::*;
pub use error::*;
pub use submission::*;

// Constants are accessed via `formgate_types::constants::FOO`
// (not re-exported to avoid name collisions).
