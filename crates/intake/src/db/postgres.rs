//! `PostgreSQL` document store.
//!
//! Queries are built at runtime (no `query!` macros) because the table is
//! picked per call from a fixed set of statements.

use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use uuid::Uuid;

use form_intake_core::{ConnectionState, RecordKind};

use super::StoreError;
use crate::models::Document;

/// `PostgreSQL`-backed store. Clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Create a connection pool with sensible defaults.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the connection cannot be established.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .min_connections(2)
            .acquire_timeout(Duration::from_secs(10))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connected while the pool is open and holds at least one connection.
    ///
    /// Read from the pool's bookkeeping, not a probe query. If the database
    /// goes away, idle connections stay counted until sqlx notices the
    /// failure (on the next acquire or when `min_connections` maintenance
    /// reconnects), so this can report `Connected` for that window.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        if self.pool.is_closed() || self.pool.size() == 0 {
            ConnectionState::Disconnected
        } else {
            ConnectionState::Connected
        }
    }

    pub(super) async fn insert(
        &self,
        kind: RecordKind,
        id: Uuid,
        created_at: DateTime<Utc>,
        document: &Document,
    ) -> Result<(), StoreError> {
        sqlx::query(insert_sql(kind))
            .bind(id)
            .bind(created_at)
            .bind(Json(document))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub(super) async fn list(&self, kind: RecordKind) -> Result<Vec<Document>, StoreError> {
        let rows: Vec<Json<Document>> = sqlx::query_scalar(list_sql(kind))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(document)| document).collect())
    }

    pub(super) async fn close(&self) {
        self.pool.close().await;
    }
}

const fn insert_sql(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Enquiry => {
            r"
            INSERT INTO intake.enquiry (id, created_at, document)
            VALUES ($1, $2, $3)
            "
        }
        RecordKind::Appointment => {
            r"
            INSERT INTO intake.appointment (id, created_at, document)
            VALUES ($1, $2, $3)
            "
        }
    }
}

const fn list_sql(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Enquiry => {
            r"
            SELECT document
            FROM intake.enquiry
            ORDER BY created_at DESC, seq DESC
            "
        }
        RecordKind::Appointment => {
            r"
            SELECT document
            FROM intake.appointment
            ORDER BY created_at DESC, seq DESC
            "
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statements_target_their_collection() {
        for kind in RecordKind::ALL {
            let table = format!("intake.{}", kind.collection());
            assert!(insert_sql(kind).contains(&table));
            assert!(list_sql(kind).contains(&table));
            assert!(list_sql(kind).contains("ORDER BY created_at DESC"));
        }
    }

    #[tokio::test]
    async fn test_lazy_pool_reports_disconnected() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost:1/unused")
            .expect("lazy pool never connects eagerly");
        let store = PgStore::from_pool(pool);
        assert_eq!(store.connection_state(), ConnectionState::Disconnected);

        store.close().await;
        assert_eq!(store.connection_state(), ConnectionState::Disconnected);
    }
}
