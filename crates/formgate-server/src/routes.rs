use std::sync::Arc;

use axum::{
    Json,
    extract::{State as AxumState, rejection::JsonRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};
use formgate_core::FileSubmissionService;
use formgate_types::{FormgateError, SubmissionPayload, constants};
use serde_json::{Value, json};
use tracing::warn;

use crate::{error::AppError, state::State};

/// Run a service call on the blocking pool; the stores do file I/O.
async fn with_service<T, F>(state: &Arc<State>, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(&FileSubmissionService) -> formgate_types::Result<T> + Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || f(&state.service))
        .await
        .map_err(|e| FormgateError::Internal(e.to_string()))?
        .map_err(AppError::from)
}

pub async fn submit_handler(
    AxumState(state): AxumState<Arc<State>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Some(payload) = body.ok().and_then(|Json(body)| payload_from(body)) else {
        // A closed gate still wins over an unreadable body.
        with_service(&state, FileSubmissionService::ensure_open).await?;
        return Err(AppError::MalformedPayload);
    };
    let accepted = with_service(&state, move |svc| svc.submit(&payload)).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Form submitted successfully!",
            "submission": accepted.submission,
            "counter": accepted.counter,
        })),
    ))
}

/// A non-empty JSON object; anything else counts as no data. Field types
/// are checked later by the validator.
fn payload_from(body: Value) -> Option<SubmissionPayload> {
    match body {
        Value::Object(map) if !map.is_empty() => serde_json::from_value(Value::Object(map)).ok(),
        _ => None,
    }
}

pub async fn status_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<impl IntoResponse, AppError> {
    let counter = with_service(&state, FileSubmissionService::status).await?;
    Ok(Json(json!({ "counter": counter })))
}

pub async fn submissions_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<impl IntoResponse, AppError> {
    let (submissions, counter) =
        with_service(&state, |svc| Ok((svc.list_submissions()?, svc.status()?))).await?;
    Ok(Json(json!({
        "submissions": submissions,
        "counter": counter,
    })))
}

pub async fn reset_handler(
    AxumState(state): AxumState<Arc<State>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(body) = body.map_err(|_| FormgateError::MissingPassword)?;
    // Only an absent key is a client mistake; a present value of the wrong
    // type is just a wrong password.
    let password = match body.get("password") {
        None => return Err(FormgateError::MissingPassword.into()),
        Some(Value::String(password)) => password.clone(),
        Some(_) => {
            warn!("counter reset rejected: incorrect password");
            return Err(FormgateError::Unauthorized.into());
        }
    };
    let counter = with_service(&state, move |svc| svc.reset(&password)).await?;

    Ok(Json(json!({
        "success": true,
        "message": "Counter reset successfully!",
        "counter": counter,
    })))
}

pub async fn download_handler(
    AxumState(state): AxumState<Arc<State>>,
) -> Result<impl IntoResponse, AppError> {
    let bytes = with_service(&state, FileSubmissionService::export)
        .await?
        .ok_or(AppError::NotFound)?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", constants::EXPORT_FILE_NAME),
            ),
        ],
        bytes,
    ))
}
