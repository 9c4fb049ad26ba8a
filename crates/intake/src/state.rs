//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Instant;

use crate::config::IntakeConfig;
use crate::db::Store;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// record store client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: IntakeConfig,
    store: Store,
    started_at: Instant,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Intake configuration
    /// * `store` - Connected record store client
    #[must_use]
    pub fn new(config: IntakeConfig, store: Store) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                store,
                started_at: Instant::now(),
            }),
        }
    }

    /// Get a reference to the intake configuration.
    #[must_use]
    pub fn config(&self) -> &IntakeConfig {
        &self.inner.config
    }

    /// Get a reference to the record store client.
    #[must_use]
    pub fn store(&self) -> &Store {
        &self.inner.store
    }

    /// Seconds since the state was built (process uptime, in practice).
    #[must_use]
    pub fn uptime_secs(&self) -> f64 {
        self.inner.started_at.elapsed().as_secs_f64()
    }
}
