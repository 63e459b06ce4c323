//! Field validation for incoming submissions.
//!
//! Each rule is a pure predicate that returns `Ok` or the specific
//! [`ValidationError`] for its field, so every rule can be tested on its own.
//! [`SubmissionValidator`] strings them together in the fixed order:
//!
//! 1. presence of `name`, `phone`, `school_name`, `selected_robots`
//! 2. name pattern
//! 3. phone pattern
//! 4. optional email
//! 5. robot types
//!
//! The first failure wins.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use formgate_types::{NewSubmission, RobotType, SubmissionPayload, ValidationError};
use regex::Regex;
use serde_json::Value;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[A-Za-z\s]+\z").expect("name pattern is valid"));

static PHONE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A[0-9]{8}\z").expect("phone pattern is valid"));

/// Return a required field, or `MissingField` if it is absent or empty.
///
/// `null`, `false`, `0`, `""`, `[]` and `{}` all count as empty.
/// Whitespace-only text counts as present.
pub fn require_present<'a>(
    value: Option<&'a Value>,
    field: &'static str,
) -> Result<&'a Value, ValidationError> {
    let present = match value {
        None | Some(Value::Null | Value::Bool(false)) => false,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Bool(true)) => true,
    };
    match value {
        Some(v) if present => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// The text of a present field, or `err` if it is not a JSON string.
fn as_text(value: &Value, err: ValidationError) -> Result<&str, ValidationError> {
    value.as_str().ok_or(err)
}

/// Letters and whitespace only.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(ValidationError::InvalidName)
    }
}

/// Exactly eight ASCII digits.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_PATTERN.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone)
    }
}

/// Optional email: blank or absent is fine, anything else needs an `@`.
///
/// Returns the address exactly as given, empty when none was given.
pub fn validate_email(email: Option<&str>) -> Result<String, ValidationError> {
    let email = email.unwrap_or_default();
    let trimmed = email.trim();
    if trimmed.is_empty() || trimmed.contains('@') {
        Ok(email.to_string())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Every entry must be one of the fixed robot types. Order is preserved.
pub fn validate_robot_types(selected: &[String]) -> Result<Vec<RobotType>, ValidationError> {
    if selected.is_empty() {
        return Err(ValidationError::MissingField("selected_robots"));
    }
    selected.iter().map(|s| s.parse::<RobotType>()).collect()
}

/// Raw JSON form of [`validate_email`]: `null` reads as omitted, other
/// non-string values are invalid.
fn email_from_value(value: Option<&Value>) -> Result<String, ValidationError> {
    match value {
        None | Some(Value::Null) => validate_email(None),
        Some(Value::String(s)) => validate_email(Some(s)),
        Some(_) => Err(ValidationError::InvalidEmail),
    }
}

/// Raw JSON form of [`validate_robot_types`]: the value must be a list of
/// strings.
fn robots_from_value(value: &Value) -> Result<Vec<RobotType>, ValidationError> {
    let Value::Array(items) = value else {
        return Err(ValidationError::NoRobotTypeSelected);
    };
    let selected = items
        .iter()
        .map(|item| match item {
            Value::String(s) => Ok(s.clone()),
            other => Err(ValidationError::InvalidRobotType(other.to_string())),
        })
        .collect::<Result<Vec<_>, _>>()?;
    validate_robot_types(&selected)
}

/// Applies every field rule to a raw payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct SubmissionValidator;

impl SubmissionValidator {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Validate `payload` and stamp it with `submitted_at`.
    ///
    /// # Errors
    /// The first [`ValidationError`] in rule order.
    pub fn validate(
        &self,
        payload: &SubmissionPayload,
        submitted_at: DateTime<Utc>,
    ) -> Result<NewSubmission, ValidationError> {
        // 1. Presence, in field order
        let name = require_present(payload.name.as_ref(), "name")?;
        let phone = require_present(payload.phone.as_ref(), "phone")?;
        let school_name = require_present(payload.school_name.as_ref(), "school_name")?;
        let selected = require_present(payload.selected_robots.as_ref(), "selected_robots")?;

        // 2-5. Patterns
        let name = as_text(name, ValidationError::InvalidName)?;
        validate_name(name)?;
        let phone = as_text(phone, ValidationError::InvalidPhone)?;
        validate_phone(phone)?;
        let email = email_from_value(payload.email.as_ref())?;
        let selected_robots = robots_from_value(selected)?;

        let school_name = match school_name {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        Ok(NewSubmission {
            name: name.to_string(),
            phone: phone.to_string(),
            email,
            school_name,
            selected_robots,
            submitted_at,
        })
    }
}
