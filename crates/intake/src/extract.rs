//! Request body extraction for form submissions.
//!
//! Website forms post either JSON or URL-encoded bodies; [`FormBody`] accepts
//! both and yields the same field mapping. The size ceiling comes from
//! `axum::extract::DefaultBodyLimit`, set once on the router.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::{StatusCode, header::CONTENT_TYPE},
};
use serde_json::Value;
use thiserror::Error;

use crate::error::AppError;
use crate::models::{Document, Submission};

/// Why a request body was rejected before reaching a handler.
#[derive(Debug, Error)]
pub enum BodyError {
    #[error("request body exceeds the configured size limit")]
    TooLarge,
    #[error(
        "unsupported content type '{0}' (expected application/json or application/x-www-form-urlencoded)"
    )]
    UnsupportedMediaType(String),
    #[error("malformed JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("JSON body must be an object")]
    NotAnObject,
    #[error("failed to read request body: {0}")]
    Read(String),
}

impl BodyError {
    /// HTTP status for this rejection.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::TooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::MalformedJson(_) | Self::NotAnObject | Self::Read(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Short client-facing summary.
    #[must_use]
    pub const fn summary(&self) -> &'static str {
        match self {
            Self::TooLarge => "Payload too large",
            Self::UnsupportedMediaType(_) => "Unsupported media type",
            Self::MalformedJson(_) | Self::NotAnObject | Self::Read(_) => "Invalid request body",
        }
    }
}

/// Submission fields parsed from a JSON or URL-encoded body.
///
/// A request without a `Content-Type` yields an empty submission, which the
/// handlers then reject for its missing fields.
#[derive(Debug)]
pub struct FormBody(pub Submission);

impl<S> FromRequest<S> for FormBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(media_type);

        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                BodyError::TooLarge
            } else {
                BodyError::Read(rejection.body_text())
            }
        })?;

        let fields = match content_type.as_deref() {
            None => Document::new(),
            Some("application/json") => parse_json(&bytes)?,
            Some(other) if other.ends_with("+json") => parse_json(&bytes)?,
            Some("application/x-www-form-urlencoded") => parse_urlencoded(&bytes),
            Some(other) => return Err(BodyError::UnsupportedMediaType(other.to_string()).into()),
        };

        Ok(Self(Submission::new(fields)))
    }
}

/// Lowercased media type without parameters (`; charset=...`).
fn media_type(header: &str) -> String {
    header
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn parse_json(bytes: &[u8]) -> Result<Document, BodyError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Document::new());
    }
    match serde_json::from_slice(bytes)? {
        Value::Object(fields) => Ok(fields),
        _ => Err(BodyError::NotAnObject),
    }
}

/// Decode `a=1&b=2`; a repeated key keeps its last value.
fn parse_urlencoded(bytes: &[u8]) -> Document {
    url::form_urlencoded::parse(bytes)
        .map(|(key, value)| (key.into_owned(), Value::String(value.into_owned())))
        .collect()
}
