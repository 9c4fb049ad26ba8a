//! Router assembly.
//!
//! # Layer Order (outermost first)
//!
//! `TraceLayer` -> CORS -> body limit -> request log -> panic responder -> routes.
//! Sentry layers are added around this router by the binary.

use axum::{Router, extract::DefaultBodyLimit, middleware::from_fn};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::{cors_layer, panic_layer, request_log_middleware};
use crate::routes;
use crate::state::AppState;

/// Build the full application router for the given state.
pub fn router(state: AppState) -> Router {
    let config = state.config();
    let cors = cors_layer(&config.cors);
    let body_limit = config.body_limit_bytes;
    let mode = config.mode;

    routes::routes()
        .fallback(routes::not_found)
        .method_not_allowed_fallback(routes::not_found)
        .layer(panic_layer(mode))
        .layer(from_fn(request_log_middleware))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
