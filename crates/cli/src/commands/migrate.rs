//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! intake-cli migrate
//! ```
//!
//! # Migration Files
//!
//! `crates/intake/migrations/`, applied in filename order:
//! ```text
//! migrations/
//! └── 20260101000000_create_intake_collections.sql
//! ```
//!
//! The server never migrates on startup; run this before the first deploy
//! and after every schema change.

use secrecy::ExposeSecret;
use sqlx::PgPool;
use thiserror::Error;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A migration failed to apply.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run intake database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the connection string is missing, the
/// database is unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let database_url =
        super::database_url().ok_or(MigrationError::MissingEnvVar("INTAKE_DATABASE_URL"))?;

    tracing::info!("Connecting to intake database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    tracing::info!("Running intake migrations...");
    sqlx::migrate!("../intake/migrations").run(&pool).await?;

    pool.close().await;
    tracing::info!("Intake migrations complete!");
    Ok(())
}
