//! Service description handler.

use axum::{Json, extract::State};
use serde::Serialize;

use super::{ENDPOINTS, Endpoint};
use crate::config::{AllowedOrigins, CorsConfig};
use crate::state::AppState;

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct ServiceDescription {
    pub message: &'static str,
    pub version: &'static str,
    pub endpoints: &'static [Endpoint],
    pub cors: CorsSummary,
}

/// The active cross-origin policy, as seen by a browser.
#[derive(Debug, Serialize)]
pub struct CorsSummary {
    pub mode: &'static str,
    pub origins: Vec<String>,
    pub credentials: bool,
}

impl CorsSummary {
    fn new(mode: &'static str, config: &CorsConfig) -> Self {
        let origins = match &config.origins {
            AllowedOrigins::Any => vec!["*".to_string()],
            AllowedOrigins::List(origins) => origins.clone(),
        };
        Self {
            mode,
            origins,
            credentials: config.allow_credentials,
        }
    }
}

/// Describe the service and its endpoints.
pub async fn home(State(state): State<AppState>) -> Json<ServiceDescription> {
    let config = state.config();

    Json(ServiceDescription {
        message: "Form Intake API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: &ENDPOINTS,
        cors: CorsSummary::new(config.mode.as_str(), &config.cors),
    })
}
