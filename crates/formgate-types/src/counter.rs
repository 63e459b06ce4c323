//! Quota counter types.
//!
//! The intake is gated by a single counter:
//! **OPEN** while `count < max_submissions`, **CLOSED** once it reaches the
//! maximum. An accepted submission moves the counter up by exactly one; only
//! an authenticated reset moves it back to zero.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Whether the intake currently accepts submissions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuotaState {
    /// `count < max`: submissions are accepted.
    Open,
    /// `count >= max`: every submission is rejected until a reset.
    Closed,
}

impl fmt::Display for QuotaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Closed => write!(f, "CLOSED"),
        }
    }
}

/// Persisted counter state. Field names match the on-disk JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaCounter {
    #[serde(default)]
    pub count: u32,
    #[serde(default = "default_max")]
    pub max_submissions: u32,
}

fn default_max() -> u32 {
    constants::MAX_SUBMISSIONS
}

impl QuotaCounter {
    /// A zeroed counter with the given maximum.
    #[must_use]
    pub fn with_max(max_submissions: u32) -> Self {
        Self {
            count: 0,
            max_submissions,
        }
    }

    #[must_use]
    pub fn state(&self) -> QuotaState {
        if self.count >= self.max_submissions {
            QuotaState::Closed
        } else {
            QuotaState::Open
        }
    }

    #[must_use]
    pub fn is_limit_reached(&self) -> bool {
        self.state() == QuotaState::Closed
    }

    /// Counter after one more accepted submission.
    #[must_use]
    pub fn incremented(self) -> Self {
        Self {
            count: self.count.saturating_add(1),
            ..self
        }
    }

    /// Counter after a reset: count zeroed, maximum untouched.
    #[must_use]
    pub fn zeroed(self) -> Self {
        Self { count: 0, ..self }
    }

    #[must_use]
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            count: self.count,
            max_submissions: self.max_submissions,
            submissions_remaining: self.max_submissions.saturating_sub(self.count),
            is_limit_reached: self.is_limit_reached(),
        }
    }
}

impl Default for QuotaCounter {
    fn default() -> Self {
        Self::with_max(constants::MAX_SUBMISSIONS)
    }
}

/// Read-only view of the counter returned to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterSnapshot {
    pub count: u32,
    pub max_submissions: u32,
    /// `max - count`, floored at zero if concurrent admissions overshot.
    pub submissions_remaining: u32,
    pub is_limit_reached: bool,
}

impl fmt::Display for CounterSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.count, self.max_submissions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_counter_is_open() {
        let c = QuotaCounter::default();
        assert_eq!(c.count, 0);
        assert_eq!(c.max_submissions, 10);
        assert_eq!(c.state(), QuotaState::Open);
    }

    #[test]
    fn reaching_max_closes_gate() {
        let mut c = QuotaCounter::with_max(2);
        c = c.incremented();
        assert_eq!(c.state(), QuotaState::Open);
        c = c.incremented();
        assert_eq!(c.state(), QuotaState::Closed);
        assert!(c.snapshot().is_limit_reached);
        assert_eq!(c.snapshot().submissions_remaining, 0);
    }

    #[test]
    fn zeroed_keeps_max() {
        let c = QuotaCounter { count: 7, max_submissions: 10 }.zeroed();
        assert_eq!(c, QuotaCounter::with_max(10));
    }

    #[test]
    fn overshoot_floors_remaining() {
        let c = QuotaCounter { count: 12, max_submissions: 10 };
        let snap = c.snapshot();
        assert_eq!(snap.submissions_remaining, 0);
        assert!(snap.is_limit_reached);
        assert_eq!(snap.to_string(), "12/10");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c: QuotaCounter = serde_json::from_str("{}").unwrap();
        assert_eq!(c, QuotaCounter::default());
        let c: QuotaCounter = serde_json::from_str(r#"{"count":4}"#).unwrap();
        assert_eq!(c.count, 4);
        assert_eq!(c.max_submissions, 10);
    }

    #[test]
    fn snapshot_wire_shape() {
        let json = serde_json::to_value(QuotaCounter { count: 3, max_submissions: 10 }.snapshot())
            .unwrap();
        assert_eq!(json["count"], 3);
        assert_eq!(json["max_submissions"], 10);
        assert_eq!(json["submissions_remaining"], 7);
        assert_eq!(json["is_limit_reached"], false);
    }
}
