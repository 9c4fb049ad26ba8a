//! Health report handler.
//!
//! Always answers 200: the `database` field carries the store's connection
//! state as last seen by the client, without a probe query.

use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use sysinfo::{ProcessesToUpdate, System};

use form_intake_core::ConnectionState;

use super::{ENDPOINTS, Endpoint};
use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub environment: &'static str,
    pub timestamp: String,
    /// Seconds since startup.
    pub uptime: f64,
    pub database: ConnectionState,
    /// Only reported in development.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<MemoryUsage>,
    pub endpoints: &'static [Endpoint],
}

/// Process memory in bytes.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MemoryUsage {
    pub resident: u64,
    #[serde(rename = "virtual")]
    pub virtual_bytes: u64,
}

/// Report liveness, store connection state and (in development) memory use.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let mode = state.config().mode;

    Json(HealthReport {
        status: "OK",
        environment: mode.as_str(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        uptime: state.uptime_secs(),
        database: state.store().connection_state(),
        memory: if mode.is_production() {
            None
        } else {
            process_memory()
        },
        endpoints: &ENDPOINTS,
    })
}

/// Memory of the current process, if the platform exposes it.
fn process_memory() -> Option<MemoryUsage> {
    let pid = sysinfo::get_current_pid().ok()?;
    let mut sys = System::new();
    sys.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    let process = sys.process(pid)?;

    Some(MemoryUsage {
        resident: process.memory(),
        virtual_bytes: process.virtual_memory(),
    })
}
