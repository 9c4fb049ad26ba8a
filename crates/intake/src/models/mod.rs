//! Domain models for intake records.
//!
//! Submissions arrive as an unordered mapping of field name to JSON value.
//! Each record type has an explicit constructor (`NewEnquiry::from_submission`,
//! `NewAppointment::from_submission`) that reads the known fields, fills the
//! defaults, checks required fields and keeps every other caller field as-is.

pub mod appointment;
pub mod enquiry;

pub use appointment::{Appointment, NewAppointment};
pub use enquiry::{Enquiry, NewEnquiry};

use serde_json::Value;
use thiserror::Error;

/// A schemaless JSON document (object).
pub type Document = serde_json::Map<String, Value>;

/// Fields the server assigns; caller-supplied values for these are dropped.
const SERVER_ASSIGNED_FIELDS: &[&str] = &["id", "_id", "createdAt"];

/// Why a submission could not be turned into a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    /// One or more required fields were absent or empty.
    #[error("missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A field was present but its value could not be used.
    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Parsed request body for a create request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission(Document);

impl Submission {
    /// Wrap an already-parsed document.
    #[must_use]
    pub const fn new(fields: Document) -> Self {
        Self(fields)
    }

    /// Borrow the raw fields.
    #[must_use]
    pub const fn fields(&self) -> &Document {
        &self.0
    }
}

impl From<Document> for Submission {
    fn from(fields: Document) -> Self {
        Self(fields)
    }
}

/// Consumes a submission field by field, collecting every missing required
/// field so the caller can report them all at once.
struct FieldReader {
    fields: Document,
    missing: Vec<&'static str>,
}

impl FieldReader {
    fn new(submission: Submission) -> Self {
        Self {
            fields: submission.0,
            missing: Vec::new(),
        }
    }

    /// Take a required text field. Records it as missing when absent or blank.
    fn required(&mut self, key: &'static str) -> Result<String, SubmissionError> {
        match self.optional(key)? {
            Some(value) => Ok(value),
            None => {
                self.missing.push(key);
                Ok(String::new())
            }
        }
    }

    /// Take an optional text field. Blank values count as absent.
    fn optional(&mut self, key: &'static str) -> Result<Option<String>, SubmissionError> {
        let Some(value) = self.fields.remove(key) else {
            return Ok(None);
        };

        let text = match value {
            Value::Null => return Ok(None),
            Value::String(s) => s,
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Array(_) | Value::Object(_) => {
                return Err(SubmissionError::InvalidField {
                    field: key,
                    reason: "expected text".to_string(),
                });
            }
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    /// Fail with every missing field, or hand back the unread caller fields.
    fn finish(mut self) -> Result<Document, SubmissionError> {
        if !self.missing.is_empty() {
            return Err(SubmissionError::MissingFields(self.missing));
        }
        for key in SERVER_ASSIGNED_FIELDS {
            self.fields.remove(*key);
        }
        Ok(self.fields)
    }
}

/// Serialize a record into its stored document form.
pub(crate) fn to_document<T: serde::Serialize>(record: &T) -> Result<Document, serde_json::Error> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        other => Err(serde::ser::Error::custom(format!(
            "record serialized to {other} instead of an object"
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn submission(value: Value) -> Submission {
        match value {
            Value::Object(map) => Submission::new(map),
            _ => panic!("test submission must be an object"),
        }
    }

    #[test]
    fn test_reader_coerces_scalars() {
        let mut reader = FieldReader::new(submission(json!({"phone": 5551234, "flag": true})));
        assert_eq!(reader.optional("phone").unwrap().as_deref(), Some("5551234"));
        assert_eq!(reader.optional("flag").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_reader_trims_and_treats_blank_as_missing() {
        let mut reader = FieldReader::new(submission(json!({"name": "  Ada ", "email": "   "})));
        assert_eq!(reader.required("name").unwrap(), "Ada");
        assert_eq!(reader.required("email").unwrap(), "");
        assert_eq!(
            reader.finish().unwrap_err(),
            SubmissionError::MissingFields(vec!["email"])
        );
    }

    #[test]
    fn test_reader_null_is_absent() {
        let mut reader = FieldReader::new(submission(json!({"subject": null})));
        assert_eq!(reader.optional("subject").unwrap(), None);
    }

    #[test]
    fn test_reader_rejects_structured_values() {
        let mut reader = FieldReader::new(submission(json!({"name": ["a", "b"]})));
        assert!(matches!(
            reader.required("name"),
            Err(SubmissionError::InvalidField { field: "name", .. })
        ));
    }

    #[test]
    fn test_finish_keeps_extras_and_drops_server_fields() {
        let reader = FieldReader::new(submission(json!({
            "id": "spoofed",
            "_id": "spoofed",
            "createdAt": "1999-01-01T00:00:00Z",
            "source": "landing-page"
        })));
        let extras = reader.finish().unwrap();
        assert_eq!(extras.len(), 1);
        assert_eq!(extras.get("source"), Some(&json!("landing-page")));
    }

    #[test]
    fn test_missing_fields_display() {
        let err = SubmissionError::MissingFields(vec!["name", "message"]);
        assert_eq!(err.to_string(), "missing required fields: name, message");
    }
}
