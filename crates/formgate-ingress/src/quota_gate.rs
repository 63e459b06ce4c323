//! Quota gate.
//!
//! Blocks every submission while the counter is CLOSED (`count >= max`).
//! The gate holds no state of its own: it judges whichever counter it is
//! shown, so the counter store stays the single owner of the count.

use formgate_types::{FormgateError, QuotaCounter, QuotaState, Result};
use tracing::debug;

/// Stateless check of a [`QuotaCounter`] against its maximum.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuotaGate;

impl QuotaGate {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Whether a submission may proceed under `counter`.
    #[must_use]
    pub fn is_open(&self, counter: &QuotaCounter) -> bool {
        counter.state() == QuotaState::Open
    }

    /// Guard a submission attempt. Returns `Ok(())` if the gate is open,
    /// or [`FormgateError::QuotaExceeded`] with the counter as read.
    pub fn check(&self, counter: &QuotaCounter) -> Result<()> {
        if self.is_open(counter) {
            Ok(())
        } else {
            debug!(count = counter.count, max = counter.max_submissions, "quota gate closed");
            Err(FormgateError::QuotaExceeded(counter.snapshot()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_count_is_open() {
        let gate = QuotaGate::new();
        assert!(gate.is_open(&QuotaCounter::default()));
        assert!(gate.check(&QuotaCounter::default()).is_ok());
    }

    #[test]
    fn one_below_max_is_open() {
        let c = QuotaCounter { count: 9, max_submissions: 10 };
        assert!(QuotaGate::new().check(&c).is_ok());
    }

    #[test]
    fn at_max_is_closed() {
        let c = QuotaCounter { count: 10, max_submissions: 10 };
        let err = QuotaGate::new().check(&c).unwrap_err();
        match err {
            FormgateError::QuotaExceeded(snap) => {
                assert_eq!(snap.count, 10);
                assert_eq!(snap.submissions_remaining, 0);
                assert!(snap.is_limit_reached);
            }
            other => panic!("Expected QuotaExceeded, got: {other:?}"),
        }
    }

    #[test]
    fn above_max_is_closed() {
        let c = QuotaCounter { count: 11, max_submissions: 10 };
        assert!(!QuotaGate::new().is_open(&c));
    }

    #[test]
    fn reset_reopens() {
        let gate = QuotaGate::new();
        let c = QuotaCounter { count: 10, max_submissions: 10 };
        assert!(!gate.is_open(&c));
        assert!(gate.is_open(&c.zeroed()));
    }
}
