//! Collection schemas enforced by the store itself.
//!
//! The `PostgreSQL` migrations encode the same rules as CHECK constraints;
//! this module applies them to the in-memory backend so both reject the same
//! documents.

use serde_json::Value;

use form_intake_core::{AppointmentStatus, RecordKind};

use super::StoreError;
use crate::models::Document;

/// Check a document against its collection's required fields.
///
/// # Errors
///
/// Returns `StoreError::Validation` naming the first required field that is
/// absent, not a string, or blank, or an appointment `status` outside the
/// known set.
pub fn validate(kind: RecordKind, document: &Document) -> Result<(), StoreError> {
    for field in kind.required_fields() {
        let present = matches!(document.get(*field), Some(Value::String(s)) if !s.trim().is_empty());
        if !present {
            return Err(StoreError::Validation(format!(
                "{kind} validation failed: {field} is required"
            )));
        }
    }
    if kind == RecordKind::Appointment {
        validate_status(document)?;
    }
    Ok(())
}

/// Same rule as the `appointment_status_known` CHECK: absent is allowed,
/// anything present must be an exact status name.
fn validate_status(document: &Document) -> Result<(), StoreError> {
    let known = match document.get("status") {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => AppointmentStatus::ALL.iter().any(|status| status.as_str() == s),
        Some(_) => false,
    };
    if known {
        Ok(())
    } else {
        Err(StoreError::Validation(
            "appointment validation failed: status is not a known appointment status".to_string(),
        ))
    }
}
