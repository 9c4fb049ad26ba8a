//! Appointment request repository.

use chrono::{SubsecRound, Utc};
use serde_json::Value;

use form_intake_core::{AppointmentId, RecordKind};

use super::{Store, StoreError};
use crate::models::{Appointment, NewAppointment, to_document};

/// Repository for appointment request records.
pub struct AppointmentRepository<'a> {
    store: &'a Store,
}

impl<'a> AppointmentRepository<'a> {
    /// Create a new appointment repository.
    #[must_use]
    pub const fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Assign an ID and creation time, then store the appointment request.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the schema rejects the record,
    /// `StoreError::Connectivity` if the store is unreachable.
    pub async fn create(&self, appointment: NewAppointment) -> Result<Appointment, StoreError> {
        let record =
            appointment.into_record(AppointmentId::generate(), Utc::now().trunc_subsecs(3));
        let document = to_document(&record).map_err(|e| StoreError::Unknown(e.to_string()))?;

        self.store
            .insert_document(
                RecordKind::Appointment,
                record.id.as_uuid(),
                record.created_at,
                &document,
            )
            .await?;

        Ok(record)
    }

    /// List all appointment requests, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Connectivity` if the store is unreachable, or
    /// `StoreError::Unknown` if a stored document no longer parses.
    pub async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        self.store
            .list_documents(RecordKind::Appointment)
            .await?
            .into_iter()
            .map(|document| {
                serde_json::from_value(Value::Object(document)).map_err(|e| {
                    StoreError::Unknown(format!("corrupt appointment document: {e}"))
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{DateTime, Utc};
    use serde_json::json;

    use super::*;
    use crate::db::MemoryStore;
    use crate::models::Submission;

    #[tokio::test]
    async fn test_stored_date_is_a_date_value() {
        let store = Store::Memory(MemoryStore::new());
        let repo = AppointmentRepository::new(&store);
        let Value::Object(fields) = json!({
            "name": "Grace",
            "email": "grace@example.com",
            "phone": "555-0100",
            "preferredDate": "2026-11-02",
            "preferredTime": "morning",
            "purpose": "Check-up"
        }) else {
            unreachable!()
        };

        repo.create(NewAppointment::from_submission(Submission::new(fields)).unwrap())
            .await
            .unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0].preferred_date,
            "2026-11-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_create_fails_when_store_closed() {
        let store = Store::Memory(MemoryStore::new());
        store.close().await;
        let Value::Object(fields) = json!({
            "name": "Grace",
            "email": "grace@example.com",
            "phone": "555-0100",
            "preferredDate": "2026-11-02",
            "preferredTime": "morning",
            "purpose": "Check-up"
        }) else {
            unreachable!()
        };

        let err = AppointmentRepository::new(&store)
            .create(NewAppointment::from_submission(Submission::new(fields)).unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Connectivity(_)));
    }
}
