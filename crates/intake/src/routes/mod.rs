//! HTTP route handlers for the intake service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Service description
//! GET  /health            - Health report
//!
//! # Enquiries
//! POST /api/enquiry       - Submit an enquiry
//! GET  /api/enquiries     - List enquiries, newest first
//!
//! # Appointments
//! POST /api/appointment   - Submit an appointment request
//! GET  /api/appointments  - List appointment requests, newest first
//! ```
//!
//! Anything else, including a known path with the wrong method, gets the
//! 404 endpoint directory from [`not_found`].

pub mod appointments;
pub mod enquiries;
pub mod health;
pub mod home;

use axum::{
    Json, Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::Serialize;

use crate::state::AppState;

/// One entry of the endpoint directory.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub path: &'static str,
    pub description: &'static str,
}

/// Every public endpoint, in the order it is documented.
pub static ENDPOINTS: [Endpoint; 6] = [
    Endpoint {
        method: "GET",
        path: "/",
        description: "Service description",
    },
    Endpoint {
        method: "GET",
        path: "/health",
        description: "Health report",
    },
    Endpoint {
        method: "POST",
        path: "/api/enquiry",
        description: "Submit an enquiry",
    },
    Endpoint {
        method: "POST",
        path: "/api/appointment",
        description: "Submit an appointment request",
    },
    Endpoint {
        method: "GET",
        path: "/api/enquiries",
        description: "List enquiries",
    },
    Endpoint {
        method: "GET",
        path: "/api/appointments",
        description: "List appointment requests",
    },
];

/// Response body for a stored submission.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: String,
}

impl CreatedResponse {
    fn new(message: &'static str, id: impl ToString) -> Self {
        Self {
            success: true,
            message,
            id: id.to_string(),
        }
    }
}

impl IntoResponse for CreatedResponse {
    fn into_response(self) -> axum::response::Response {
        (StatusCode::CREATED, Json(self)).into_response()
    }
}

/// Response body for a collection listing.
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub count: usize,
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    fn new(data: Vec<T>) -> Self {
        Self {
            success: true,
            count: data.len(),
            data,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NotFoundResponse {
    error: &'static str,
    available_endpoints: Vec<String>,
}

/// Fallback for unmatched routes and methods.
pub async fn not_found() -> impl IntoResponse {
    let available_endpoints = ENDPOINTS
        .iter()
        .map(|e| format!("{} {}", e.method, e.path))
        .collect();

    (
        StatusCode::NOT_FOUND,
        Json(NotFoundResponse {
            error: "Route not found",
            available_endpoints,
        }),
    )
}

/// Create all routes for the intake service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .nest("/api", api_routes())
}

/// Create the `/api` routes router.
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/enquiry", post(enquiries::create))
        .route("/enquiries", get(enquiries::list))
        .route("/appointment", post(appointments::create))
        .route("/appointments", get(appointments::list))
}
