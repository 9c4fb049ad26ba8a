//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. Route handlers return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};
use thiserror::Error;

use form_intake_core::RecordKind;

use crate::db::StoreError;
use crate::extract::BodyError;
use crate::models::SubmissionError;

/// Application-level error type for the intake service.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body could not be read or parsed.
    #[error("Invalid body: {0}")]
    Body(#[from] BodyError),

    /// The submission failed required-field or value checks.
    #[error("Invalid {kind} submission: {source}")]
    Submission {
        kind: RecordKind,
        source: SubmissionError,
    },

    /// Storing a new record failed.
    #[error("Failed to store {kind}: {source}")]
    Create { kind: RecordKind, source: StoreError },

    /// Reading a collection failed.
    #[error("Failed to list {kind} records: {source}")]
    List { kind: RecordKind, source: StoreError },

    /// Unexpected failure; `details` is only filled outside production.
    #[error("Internal error")]
    Internal { details: Option<String> },
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Body(err) => err.status(),
            Self::Submission { .. }
            | Self::Create {
                source: StoreError::Validation(_),
                ..
            } => StatusCode::BAD_REQUEST,
            Self::Create { .. } | Self::List { .. } | Self::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Body(err) => json!({
                "error": err.summary(),
                "details": err.to_string(),
            }),
            Self::Submission {
                source: SubmissionError::MissingFields(fields),
                ..
            } => json!({
                "error": "Missing required fields",
                "code": "missing_required_fields",
                "details": format!("{} required", fields.join(", ")),
                "fields": fields,
            }),
            Self::Submission {
                source: source @ SubmissionError::InvalidField { field, .. },
                ..
            } => json!({
                "error": "Validation error",
                "code": "invalid_field",
                "details": source.to_string(),
                "fields": [field],
            }),
            Self::Create {
                source: StoreError::Validation(details),
                ..
            } => json!({
                "error": "Validation error",
                "code": "validation_error",
                "details": details,
            }),
            Self::Create { kind, source } => json!({
                "error": format!("Failed to submit {}", kind.label().to_lowercase()),
                "details": source.to_string(),
            }),
            Self::List { source, .. } => json!({
                "success": false,
                "error": source.to_string(),
            }),
            Self::Internal { details } => {
                let mut body = json!({ "error": "Internal server error" });
                if let Some(details) = details {
                    body["details"] = Value::String(details.clone());
                }
                body
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
