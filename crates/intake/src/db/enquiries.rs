//! Enquiry repository.

use chrono::{SubsecRound, Utc};
use serde_json::Value;

use form_intake_core::{EnquiryId, RecordKind};

use super::{Store, StoreError};
use crate::models::{Enquiry, NewEnquiry, to_document};

/// Repository for enquiry records.
pub struct EnquiryRepository<'a> {
    store: &'a Store,
}

impl<'a> EnquiryRepository<'a> {
    /// Create a new enquiry repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Assign an ID and creation time, then store the enquiry.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the schema rejects the record,
    /// `StoreError::Connectivity` if the store is unreachable.
    pub async fn create(&self, enquiry: NewEnquiry) -> Result<Enquiry, StoreError> {
        let record = enquiry.into_record(EnquiryId::generate(), Utc::now().trunc_subsecs(3));
        let document = to_document(&record).map_err(|e| StoreError::Unknown(e.to_string()))?;

        self.store
            .insert_document(
                RecordKind::Enquiry,
                record.id.as_uuid(),
                record.created_at,
                &document,
            )
            .await?;

        Ok(record)
    }

    /// List all enquiries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connectivity` if the store is unreachable, or
    /// `StoreError::Unknown` if a stored document no longer parses.
    pub async fn list(&self) -> Result<Vec<Enquiry>, StoreError> {
        self.store
            .list_documents(RecordKind::Enquiry)
            .await?
            .into_iter()
            .map(|document| {
                serde_json::from_value(Value::Object(document))
                    .map_err(|e| StoreError::Unknown(format!("corrupt enquiry document: {e}")))
            })
            .collect()
    }
}
