//! HTTP mapping of FormGate errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use formgate_types::FormgateError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No data provided")]
    MalformedPayload,

    #[error("No submissions file found")]
    NotFound,

    #[error(transparent)]
    Formgate(#[from] FormgateError),
}

impl AppError {
    /// - Validation, missing body, missing password: 400 Bad Request
    /// - Wrong password: 401 Unauthorized
    /// - Quota closed: 403 Forbidden
    /// - No table to download: 404 Not Found
    /// - Everything else: 500 Internal Server Error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MalformedPayload
            | Self::Formgate(FormgateError::Validation(_) | FormgateError::MissingPassword) => {
                StatusCode::BAD_REQUEST
            }
            Self::Formgate(FormgateError::Unauthorized) => StatusCode::UNAUTHORIZED,
            Self::Formgate(FormgateError::QuotaExceeded(_)) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Formgate(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message shown to the caller. Internal failures stay generic.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::MalformedPayload | Self::NotFound => self.to_string(),
            Self::Formgate(FormgateError::Validation(e)) => e.to_string(),
            Self::Formgate(FormgateError::QuotaExceeded(_)) => {
                "Form submission limit reached. No more submissions allowed.".to_string()
            }
            Self::Formgate(FormgateError::Unauthorized) => "Incorrect password".to_string(),
            Self::Formgate(FormgateError::MissingPassword) => "Password is required".to_string(),
            Self::Formgate(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("request failed: {self}");
        }

        let body = match &self {
            Self::Formgate(FormgateError::QuotaExceeded(counter)) => json!({
                "success": false,
                "message": self.message(),
                "counter": counter,
            }),
            _ => json!({
                "success": false,
                "message": self.message(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use formgate_types::{QuotaCounter, ValidationError};

    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(AppError::MalformedPayload.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            AppError::from(FormgateError::Validation(ValidationError::InvalidName)).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(FormgateError::MissingPassword).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(FormgateError::Unauthorized).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(FormgateError::QuotaExceeded(QuotaCounter::default().snapshot()))
                .status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::from(FormgateError::Storage("disk".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_messages_do_not_leak_details() {
        let err = AppError::from(FormgateError::Io("/secret/path: permission denied".into()));
        assert_eq!(err.message(), "Internal server error");
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn validation_message_is_field_specific() {
        let err = AppError::from(FormgateError::from(ValidationError::MissingField("phone")));
        assert_eq!(err.message(), "Missing required field: phone");
    }
}
