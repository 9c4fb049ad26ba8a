//! Record listing command.
//!
//! Prints every record of one collection as a pretty JSON array on stdout,
//! newest first. Progress goes to stderr so the output can be piped.

use form_intake::db::{AppointmentRepository, EnquiryRepository, Store, StoreError};
use form_intake_core::RecordKind;
use thiserror::Error;

/// Errors that can occur while listing records.
#[derive(Debug, Error)]
pub enum ListError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// The record store rejected the request.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A record could not be rendered.
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Print the records of `kind`.
///
/// # Errors
///
/// Returns `ListError` if the store is unreachable or a record is corrupt.
pub async fn run(kind: RecordKind) -> Result<(), ListError> {
    let database_url =
        super::database_url().ok_or(ListError::MissingEnvVar("INTAKE_DATABASE_URL"))?;

    let store = Store::connect(&database_url).await?;
    let output = render(&store, kind).await;
    store.close().await;
    let output = output?;

    #[allow(clippy::print_stdout)]
    {
        println!("{output}");
    }
    Ok(())
}

async fn render(store: &Store, kind: RecordKind) -> Result<String, ListError> {
    let output = match kind {
        RecordKind::Enquiry => {
            let records = EnquiryRepository::new(store).list().await?;
            tracing::info!(count = records.len(), "Fetched enquiries");
            serde_json::to_string_pretty(&records)?
        }
        RecordKind::Appointment => {
            let records = AppointmentRepository::new(store).list().await?;
            tracing::info!(count = records.len(), "Fetched appointment requests");
            serde_json::to_string_pretty(&records)?
        }
    };
    Ok(output)
}
