//! Error types for FormGate.
//!
//! All errors use the `FG_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors (caller input)
//! - 2xx: Quota errors
//! - 3xx: Authentication errors
//! - 9xx: Storage / internal errors

use thiserror::Error;

use crate::CounterSnapshot;

/// A single field-level validation failure.
///
/// The `Display` text is the human-readable message returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was absent, null, or empty.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// The name contains something other than ASCII letters and whitespace.
    #[error("Name must contain only letters and spaces")]
    InvalidName,

    /// The phone number is not exactly eight ASCII digits.
    #[error("Phone number must be exactly 8 digits")]
    InvalidPhone,

    /// A non-blank email without an `@`.
    #[error("Email must contain @ symbol")]
    InvalidEmail,

    /// `selected_robots` was given but is not a list.
    #[error("Please select at least one robot type")]
    NoRobotTypeSelected,

    /// A selected robot type outside the fixed enumeration.
    #[error("Invalid robot type selected: {0}")]
    InvalidRobotType(String),
}

impl ValidationError {
    /// The payload field this failure refers to.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(field) => field,
            Self::InvalidName => "name",
            Self::InvalidPhone => "phone",
            Self::InvalidEmail => "email",
            Self::NoRobotTypeSelected | Self::InvalidRobotType(_) => "selected_robots",
        }
    }
}

/// Central error enum for all FormGate operations.
#[derive(Debug, Error)]
pub enum FormgateError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The payload failed a field rule.
    #[error("FG_ERR_100: Invalid submission: {0}")]
    Validation(#[from] ValidationError),

    // =================================================================
    // Quota Errors (2xx)
    // =================================================================
    /// The quota gate is closed; carries the counter as it was read.
    #[error("FG_ERR_200: Form submission limit reached ({0})")]
    QuotaExceeded(CounterSnapshot),

    // =================================================================
    // Authentication Errors (3xx)
    // =================================================================
    /// The reset password did not match.
    #[error("FG_ERR_300: Incorrect password")]
    Unauthorized,

    /// A reset request carried no password at all.
    #[error("FG_ERR_301: Password is required")]
    MissingPassword,

    // =================================================================
    // General / Internal (9xx)
    // =================================================================
    /// Unrecoverable internal error.
    #[error("FG_ERR_900: Internal error: {0}")]
    Internal(String),

    /// Serialization / deserialization error.
    #[error("FG_ERR_901: Serialization error: {0}")]
    Serialization(String),

    /// Configuration error (bad environment value, etc.).
    #[error("FG_ERR_902: Configuration error: {0}")]
    Configuration(String),

    /// I/O error (disk).
    #[error("FG_ERR_903: I/O error: {0}")]
    Io(String),

    /// A record or counter store failed to read or write.
    #[error("FG_ERR_904: Storage error: {0}")]
    Storage(String),
}

impl FormgateError {
    /// Caller input was at fault; retrying the same request cannot succeed.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Validation(_)
                | Self::QuotaExceeded(_)
                | Self::Unauthorized
                | Self::MissingPassword
        )
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, FormgateError>;

// Conversion from std::io::Error
impl From<std::io::Error> for FormgateError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for FormgateError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuotaCounter;

    #[test]
    fn validation_messages_name_the_field() {
        assert_eq!(
            ValidationError::MissingField("phone").to_string(),
            "Missing required field: phone"
        );
        assert_eq!(
            ValidationError::InvalidRobotType("Flying Robot".into()).to_string(),
            "Invalid robot type selected: Flying Robot"
        );
        assert_eq!(ValidationError::InvalidName.field(), "name");
        assert_eq!(ValidationError::InvalidRobotType("x".into()).field(), "selected_robots");
        assert_eq!(ValidationError::NoRobotTypeSelected.field(), "selected_robots");
    }

    #[test]
    fn quota_exceeded_display() {
        let snap = QuotaCounter { count: 10, max_submissions: 10 }.snapshot();
        let msg = FormgateError::QuotaExceeded(snap).to_string();
        assert!(msg.starts_with("FG_ERR_200"), "Got: {msg}");
        assert!(msg.contains("10/10"));
    }

    #[test]
    fn unauthorized_is_generic() {
        let msg = FormgateError::Unauthorized.to_string();
        assert_eq!(msg, "FG_ERR_300: Incorrect password");
    }

    #[test]
    fn client_vs_server_errors() {
        assert!(FormgateError::from(ValidationError::InvalidPhone).is_client_error());
        assert!(FormgateError::Unauthorized.is_client_error());
        assert!(!FormgateError::Storage("disk full".into()).is_client_error());
        assert!(!FormgateError::from(std::io::Error::other("boom")).is_client_error());
    }

    #[test]
    fn all_errors_have_fg_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(FormgateError::Validation(ValidationError::InvalidEmail)),
            Box::new(FormgateError::Unauthorized),
            Box::new(FormgateError::MissingPassword),
            Box::new(FormgateError::Internal("test".into())),
            Box::new(FormgateError::Storage("test".into())),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("FG_ERR_"),
                "Error missing FG_ERR_ prefix: {msg}"
            );
        }
    }
}
