//! Appointment request records.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use form_intake_core::{AppointmentId, AppointmentStatus, RecordKind};

use super::{Document, FieldReader, Submission, SubmissionError};

/// A stored appointment request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Server-assigned identifier.
    pub id: AppointmentId,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Requested day, stored as a timestamp (midnight UTC for plain dates).
    pub preferred_date: DateTime<Utc>,
    /// Free-form time slot, e.g. "10:30" or "afternoon".
    pub preferred_time: String,
    pub purpose: String,
    /// Submission type, `appointment_request` unless the caller names another.
    #[serde(rename = "type")]
    pub appointment_type: String,
    pub status: AppointmentStatus,
    /// Set once at insertion.
    pub created_at: DateTime<Utc>,
    /// Any other fields the caller sent.
    #[serde(flatten)]
    pub extra: Document,
}

/// A validated appointment request that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAppointment {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub preferred_date: DateTime<Utc>,
    pub preferred_time: String,
    pub purpose: String,
    pub appointment_type: String,
    pub status: AppointmentStatus,
    pub extra: Document,
}

impl NewAppointment {
    /// Build an appointment request from caller fields.
    ///
    /// Fills the `type` and `status` (`pending`) defaults and parses
    /// `preferredDate` into a date value.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::MissingFields` listing every absent or blank
    /// required field, or `SubmissionError::InvalidField` if `preferredDate`
    /// is not a date, `status` is not a known status, or a known field is not
    /// text.
    pub fn from_submission(submission: Submission) -> Result<Self, SubmissionError> {
        let mut reader = FieldReader::new(submission);

        let name = reader.required("name")?;
        let email = reader.required("email")?;
        let phone = reader.required("phone")?;
        let preferred_date = reader.required("preferredDate")?;
        let preferred_time = reader.required("preferredTime")?;
        let purpose = reader.required("purpose")?;
        let appointment_type = reader
            .optional("type")?
            .unwrap_or_else(|| RecordKind::Appointment.default_type().to_string());
        let status = reader.optional("status")?;
        let extra = reader.finish()?;

        let preferred_date =
            parse_preferred_date(&preferred_date).ok_or_else(|| SubmissionError::InvalidField {
                field: "preferredDate",
                reason: format!("'{preferred_date}' is not a valid date"),
            })?;
        let status = status
            .map(|raw| {
                raw.parse::<AppointmentStatus>()
                    .map_err(|e| SubmissionError::InvalidField {
                        field: "status",
                        reason: e.to_string(),
                    })
            })
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            name,
            email,
            phone,
            preferred_date,
            preferred_time,
            purpose,
            appointment_type,
            status,
            extra,
        })
    }

    /// Assign the identifier and creation time, producing the record to store.
    #[must_use]
    pub fn into_record(self, id: AppointmentId, created_at: DateTime<Utc>) -> Appointment {
        Appointment {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            preferred_date: self.preferred_date,
            preferred_time: self.preferred_time,
            purpose: self.purpose,
            appointment_type: self.appointment_type,
            status: self.status,
            created_at,
            extra: self.extra,
        }
    }
}

/// Parse a `YYYY-MM-DD` date (as midnight UTC) or an RFC 3339 timestamp.
fn parse_preferred_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Some(date.and_time(NaiveTime::MIN).and_utc());
    }
    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn submission(value: Value) -> Submission {
        match value {
            Value::Object(map) => Submission::new(map),
            _ => panic!("test submission must be an object"),
        }
    }

    fn valid() -> Value {
        json!({
            "name": "Grace",
            "email": "grace@example.com",
            "phone": "+44 20 7946 0000",
            "preferredDate": "2026-11-02",
            "preferredTime": "10:30",
            "purpose": "Consultation"
        })
    }

    #[test]
    fn test_plain_date_becomes_midnight_utc() {
        let appointment = NewAppointment::from_submission(submission(valid())).unwrap();
        assert_eq!(
            appointment.preferred_date,
            "2026-11-02T00:00:00Z".parse::<DateTime<Utc>>().unwrap()
        );
        assert_eq!(appointment.appointment_type, "appointment_request");
    }

    #[test]
    fn test_rfc3339_date_is_normalized_to_utc() {
        assert_eq!(
            parse_preferred_date("2026-11-02T09:00:00+01:00"),
            Some("2026-11-02T08:00:00Z".parse::<DateTime<Utc>>().unwrap())
        );
    }

    #[test]
    fn test_unparseable_date_is_invalid() {
        let mut body = valid();
        body["preferredDate"] = json!("next tuesday");
        let err = NewAppointment::from_submission(submission(body)).unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::InvalidField {
                field: "preferredDate",
                ..
            }
        ));
    }

    #[test]
    fn test_missing_fields_take_precedence_over_bad_date() {
        let err = NewAppointment::from_submission(submission(json!({
            "name": "Grace",
            "preferredDate": "garbage"
        })))
        .unwrap_err();
        assert_eq!(
            err,
            SubmissionError::MissingFields(vec!["email", "phone", "preferredTime", "purpose"])
        );
    }

    #[test]
    fn test_supplied_status_is_kept() {
        let mut body = valid();
        body["status"] = json!("confirmed");
        let record = NewAppointment::from_submission(submission(body))
            .unwrap()
            .into_record(AppointmentId::generate(), Utc::now());

        assert_eq!(record.status, AppointmentStatus::Confirmed);
        assert!(!record.extra.contains_key("status"));
    }

    #[test]
    fn test_omitted_status_defaults_to_pending() {
        let record = NewAppointment::from_submission(submission(valid()))
            .unwrap()
            .into_record(AppointmentId::generate(), Utc::now());

        assert_eq!(record.status, AppointmentStatus::Pending);
    }

    #[test]
    fn test_unknown_status_is_invalid() {
        let mut body = valid();
        body["status"] = json!("rescheduled");
        let err = NewAppointment::from_submission(submission(body)).unwrap_err();
        assert!(matches!(
            err,
            SubmissionError::InvalidField {
                field: "status",
                ..
            }
        ));
    }

    #[test]
    fn test_record_serializes_date_as_timestamp() {
        let record = NewAppointment::from_submission(submission(valid()))
            .unwrap()
            .into_record(AppointmentId::generate(), Utc::now());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["preferredDate"], "2026-11-02T00:00:00Z");
        assert_eq!(value["status"], "pending");
        assert_eq!(value["type"], "appointment_request");
    }
}
