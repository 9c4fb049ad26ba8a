//! Record store for enquiries and appointment requests.
//!
//! # Collections
//!
//! - `intake.enquiry` - General enquiries
//! - `intake.appointment` - Appointment requests
//!
//! Each record is kept as a JSON document next to its `id` and `created_at`
//! columns. Records are append-only: nothing here updates or deletes.
//!
//! # Backends
//!
//! - `PostgreSQL` (any `postgres://` connection string)
//! - In-process memory (`memory://`), used by tests and local runs
//!
//! # Migrations
//!
//! Migrations are stored in `crates/intake/migrations/` and run via:
//! ```bash
//! cargo run -p form-intake-cli -- migrate
//! ```

pub mod appointments;
pub mod enquiries;
pub mod memory;
pub mod postgres;
pub mod schema;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use uuid::Uuid;

use form_intake_core::{ConnectionState, RecordKind};

pub use appointments::AppointmentRepository;
pub use enquiries::EnquiryRepository;
pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::models::Document;

/// Connection string prefix selecting the in-memory backend.
pub const MEMORY_URL_PREFIX: &str = "memory://";

/// Errors returned by the record store, classified by cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The document was rejected by the collection schema.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The store could not be reached or the connection was lost.
    #[error("store unavailable: {0}")]
    Connectivity(String),

    /// Anything else (constraint conflicts, corrupt documents, driver errors).
    #[error("store error: {0}")]
    Unknown(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => match db_err.kind() {
                sqlx::error::ErrorKind::CheckViolation
                | sqlx::error::ErrorKind::NotNullViolation => {
                    Self::Validation(db_err.message().to_string())
                }
                _ => Self::Unknown(err.to_string()),
            },
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => Self::Connectivity(err.to_string()),
            _ => Self::Unknown(err.to_string()),
        }
    }
}

/// Shared record store client.
///
/// Created once at startup and cloned into every handler through the
/// application state. Clones share the same underlying connection pool or
/// memory buffer.
#[derive(Debug, Clone)]
pub enum Store {
    Postgres(PgStore),
    Memory(MemoryStore),
}

impl Store {
    /// Connect to the store named by a connection string.
    ///
    /// `memory://` selects the in-memory backend; anything else is handed to
    /// the `PostgreSQL` driver.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connectivity` if the database cannot be reached.
    pub async fn connect(url: &SecretString) -> Result<Self, StoreError> {
        let url = url.expose_secret();
        if url.starts_with(MEMORY_URL_PREFIX) {
            return Ok(Self::Memory(MemoryStore::new()));
        }
        Ok(Self::Postgres(PgStore::connect(url).await?))
    }

    /// Short backend name for logs and the service description.
    #[must_use]
    pub const fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::Memory(_) => "memory",
        }
    }

    /// Current connection state, read from the client without a round-trip.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        match self {
            Self::Postgres(store) => store.connection_state(),
            Self::Memory(store) => store.connection_state(),
        }
    }

    /// Insert one document into a collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the collection schema rejects the
    /// document, `StoreError::Connectivity` if the store is unreachable.
    pub async fn insert_document(
        &self,
        kind: RecordKind,
        id: Uuid,
        created_at: DateTime<Utc>,
        document: &Document,
    ) -> Result<(), StoreError> {
        match self {
            Self::Postgres(store) => store.insert(kind, id, created_at, document).await,
            Self::Memory(store) => store.insert(kind, id, created_at, document),
        }
    }

    /// Every document in a collection, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connectivity` if the store is unreachable.
    pub async fn list_documents(&self, kind: RecordKind) -> Result<Vec<Document>, StoreError> {
        match self {
            Self::Postgres(store) => store.list(kind).await,
            Self::Memory(store) => store.list(kind),
        }
    }

    /// Close the connection. Later operations fail with `Connectivity`.
    pub async fn close(&self) {
        match self {
            Self::Postgres(store) => store.close().await,
            Self::Memory(store) => store.close(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_url_selects_memory_backend() {
        let store = Store::connect(&SecretString::from("memory://"))
            .await
            .unwrap();
        assert_eq!(store.backend(), "memory");
        assert_eq!(store.connection_state(), ConnectionState::Connected);
    }

    #[tokio::test]
    async fn test_close_disconnects() {
        let store = Store::Memory(MemoryStore::new());
        store.close().await;
        assert_eq!(store.connection_state(), ConnectionState::Disconnected);
        assert!(matches!(
            store.list_documents(RecordKind::Enquiry).await,
            Err(StoreError::Connectivity(_))
        ));
    }

    #[test]
    fn test_pool_errors_are_connectivity() {
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolTimedOut),
            StoreError::Connectivity(_)
        ));
        assert!(matches!(
            StoreError::from(sqlx::Error::PoolClosed),
            StoreError::Connectivity(_)
        ));
    }

    #[test]
    fn test_other_driver_errors_are_unknown() {
        assert!(matches!(
            StoreError::from(sqlx::Error::RowNotFound),
            StoreError::Unknown(_)
        ));
    }
}
