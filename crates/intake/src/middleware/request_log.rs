//! Request log middleware.
//!
//! Emits one structured event per request with the arrival timestamp,
//! method, path and `Origin` header. The response is passed through untouched.

use axum::{
    extract::Request,
    http::header::ORIGIN,
    middleware::Next,
    response::Response,
};
use chrono::{SecondsFormat, Utc};

/// Log every request before it is dispatched.
pub async fn request_log_middleware(request: Request, next: Next) -> Response {
    let origin = request
        .headers()
        .get(ORIGIN)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("-");

    tracing::info!(
        timestamp = %Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        method = %request.method(),
        path = %request.uri().path(),
        origin = %origin,
        "request received"
    );

    next.run(request).await
}
