//! Submission types for the FormGate intake endpoint.
//!
//! A [`SubmissionPayload`] is whatever the caller sent. The ingress validator
//! turns it into a [`NewSubmission`], and the record store assigns the
//! sequential [`SubmissionId`] that makes it a stored [`Submission`].

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{ValidationError, constants};

// ---------------------------------------------------------------------------
// SubmissionId
// ---------------------------------------------------------------------------

/// Sequential submission identifier. The first accepted submission is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SubmissionId(pub u64);

impl SubmissionId {
    /// Identifier assigned to the first record of an empty store.
    pub const FIRST: Self = Self(1);

    /// Identifier for the record appended after `existing` stored records.
    #[must_use]
    pub fn after(existing: usize) -> Self {
        Self(existing as u64 + 1)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// RobotType
// ---------------------------------------------------------------------------

/// The fixed set of robot types a submission may select.
///
/// Matching against the wire strings is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum RobotType {
    #[serde(rename = "Cleaning Robot")]
    CleaningRobot,
    #[serde(rename = "Security Robot")]
    SecurityRobot,
    #[serde(rename = "Delivery Robot")]
    DeliveryRobot,
}

impl RobotType {
    /// All variants, in display order.
    pub const ALL: [Self; 3] = [Self::CleaningRobot, Self::SecurityRobot, Self::DeliveryRobot];

    /// The exact wire string for this robot type.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CleaningRobot => constants::ALLOWED_ROBOT_TYPES[0],
            Self::SecurityRobot => constants::ALLOWED_ROBOT_TYPES[1],
            Self::DeliveryRobot => constants::ALLOWED_ROBOT_TYPES[2],
        }
    }

    /// Join robot types into the single-column storage form.
    #[must_use]
    pub fn join(robots: &[Self]) -> String {
        robots
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(constants::ROBOT_TYPE_SEPARATOR)
    }
}

impl fmt::Display for RobotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RobotType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidRobotType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// SubmissionPayload — raw caller input
// ---------------------------------------------------------------------------

/// Unvalidated submission as received from the caller.
///
/// Fields are kept as raw JSON so that any body shaped like an object
/// reaches the quota gate; wrong types surface later as field-level
/// validation errors instead of decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub email: Option<Value>,
    #[serde(default)]
    pub school_name: Option<Value>,
    #[serde(default)]
    pub selected_robots: Option<Value>,
}

#[cfg(any(test, feature = "test-helpers"))]
impl SubmissionPayload {
    /// A payload that passes every validation rule.
    pub fn dummy_valid() -> Self {
        Self {
            name: Some(Value::from("John Doe")),
            phone: Some(Value::from("12345678")),
            email: Some(Value::from("john@example.com")),
            school_name: Some(Value::from("Springfield Elementary")),
            selected_robots: Some(Value::from(vec!["Cleaning Robot"])),
        }
    }

    /// A valid payload whose name is derived from `n`, so sequential
    /// fixtures stay distinct without breaking the letters-only rule.
    pub fn dummy_numbered(n: usize) -> Self {
        let suffix: String = n
            .to_string()
            .chars()
            .map(|c| char::from(b'A' + (c as u8 - b'0')))
            .collect();
        Self {
            name: Some(Value::from(format!("Student {suffix}"))),
            ..Self::dummy_valid()
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(Value::from(name));
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(Value::from(phone));
        self
    }

    pub fn with_email(mut self, email: Option<&str>) -> Self {
        self.email = email.map(Value::from);
        self
    }

    pub fn with_robots(mut self, robots: &[&str]) -> Self {
        self.selected_robots = Some(Value::from(robots.to_vec()));
        self
    }

    /// Replace `selected_robots` with an arbitrary JSON value.
    pub fn with_raw_robots(mut self, robots: Value) -> Self {
        self.selected_robots = Some(robots);
        self
    }
}

// ---------------------------------------------------------------------------
// NewSubmission — validated, not yet stored
// ---------------------------------------------------------------------------

/// A submission that passed validation and is waiting for an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSubmission {
    pub name: String,
    pub phone: String,
    /// Empty when the caller omitted it.
    pub email: String,
    pub school_name: String,
    pub selected_robots: Vec<RobotType>,
    pub submitted_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Submission — stored, immutable
// ---------------------------------------------------------------------------

/// An accepted submission. Never updated or deleted once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub school_name: String,
    pub selected_robots: Vec<RobotType>,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    /// Attach a store-assigned id to a validated submission.
    #[must_use]
    pub fn from_new(id: SubmissionId, new: NewSubmission) -> Self {
        Self {
            id,
            name: new.name,
            phone: new.phone,
            email: new.email,
            school_name: new.school_name,
            selected_robots: new.selected_robots,
            submitted_at: new.submitted_at,
        }
    }

    /// Selected robot types flattened with `", "`.
    #[must_use]
    pub fn robots_joined(&self) -> String {
        RobotType::join(&self.selected_robots)
    }
}
