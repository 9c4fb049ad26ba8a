//! Catch-all responder for handler panics.
//!
//! Anything a handler does not map to an `AppError` itself ends up here and
//! is answered with a JSON 500. The panic message is only exposed to clients
//! outside production.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use form_intake_core::DeploymentMode;

use crate::error::AppError;

/// Panic-catching layer whose response detail depends on the deployment mode.
#[must_use]
pub fn panic_layer(
    mode: DeploymentMode,
) -> CatchPanicLayer<impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone> {
    let expose_details = !mode.is_production();
    CatchPanicLayer::custom(move |payload: Box<dyn Any + Send + 'static>| {
        let message = panic_message(payload.as_ref());
        tracing::error!(panic = %message, "Handler panicked");
        AppError::Internal {
            details: expose_details.then_some(message),
        }
        .into_response()
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Router,
        body::{Body, to_bytes},
        http::{Request, StatusCode},
        routing::get,
    };
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;

    #[allow(clippy::unused_async)]
    async fn explode() -> &'static str {
        panic!("kaboom")
    }

    async fn call(mode: DeploymentMode) -> (StatusCode, Value) {
        let app = Router::new()
            .route("/", get(explode))
            .layer(panic_layer(mode));
        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_development_includes_panic_message() {
        let (status, body) = call(DeploymentMode::Development).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert_eq!(body["details"], "kaboom");
    }

    #[tokio::test]
    async fn test_production_hides_panic_message() {
        let (status, body) = call(DeploymentMode::Production).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("details").is_none());
    }
}
