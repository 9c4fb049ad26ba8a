//! General enquiry records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use form_intake_core::{EnquiryId, RecordKind};

use super::{Document, FieldReader, Submission, SubmissionError};

/// A stored enquiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enquiry {
    /// Server-assigned identifier.
    pub id: EnquiryId,
    pub name: String,
    /// Contact address as typed by the caller (format is not checked).
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    /// Submission type, `general_enquiry` unless the caller names another.
    #[serde(rename = "type")]
    pub enquiry_type: String,
    /// Set once at insertion.
    pub created_at: DateTime<Utc>,
    /// Any other fields the caller sent.
    #[serde(flatten)]
    pub extra: Document,
}

/// A validated enquiry that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub enquiry_type: String,
    pub extra: Document,
}

impl NewEnquiry {
    /// Build an enquiry from caller fields, filling the `type` default.
    ///
    /// # Errors
    ///
    /// Returns `SubmissionError::MissingFields` listing every absent or blank
    /// required field (`name`, `email`, `message`), or
    /// `SubmissionError::InvalidField` if a known field is not text.
    pub fn from_submission(submission: Submission) -> Result<Self, SubmissionError> {
        let mut reader = FieldReader::new(submission);

        let name = reader.required("name")?;
        let email = reader.required("email")?;
        let message = reader.required("message")?;
        let phone = reader.optional("phone")?;
        let subject = reader.optional("subject")?;
        let enquiry_type = reader
            .optional("type")?
            .unwrap_or_else(|| RecordKind::Enquiry.default_type().to_string());
        let extra = reader.finish()?;

        Ok(Self {
            name,
            email,
            phone,
            subject,
            message,
            enquiry_type,
            extra,
        })
    }

    /// Assign the identifier and creation time, producing the record to store.
    #[must_use]
    pub fn into_record(self, id: EnquiryId, created_at: DateTime<Utc>) -> Enquiry {
        Enquiry {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            subject: self.subject,
            message: self.message,
            enquiry_type: self.enquiry_type,
            created_at,
            extra: self.extra,
        }
    }
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

    #[test]
    fn test_minimal_enquiry_gets_default_type() {
        let enquiry = NewEnquiry::from_submission(submission(json!({
            "name": "A",
            "email": "a@x.com",
            "message": "hi"
        })))
        .unwrap();

        assert_eq!(enquiry.enquiry_type, "general_enquiry");
        assert_eq!(enquiry.phone, None);
        assert!(enquiry.extra.is_empty());
    }

    #[test]
    fn test_caller_type_is_kept() {
        let enquiry = NewEnquiry::from_submission(submission(json!({
            "name": "A",
            "email": "a@x.com",
            "message": "hi",
            "type": "press"
        })))
        .unwrap();

        assert_eq!(enquiry.enquiry_type, "press");
    }

    #[test]
    fn test_reports_all_missing_fields() {
        let err = NewEnquiry::from_submission(submission(json!({"email": "a@x.com"}))).unwrap_err();
        assert_eq!(err, SubmissionError::MissingFields(vec!["name", "message"]));
    }

    #[test]
    fn test_email_format_is_not_checked() {
        let enquiry = NewEnquiry::from_submission(submission(json!({
            "name": "A",
            "email": "not-an-email",
            "message": "hi"
        })))
        .unwrap();

        assert_eq!(enquiry.email, "not-an-email");
    }

    #[test]
    fn test_record_serializes_with_wire_names() {
        let created_at = "2026-03-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let record = NewEnquiry::from_submission(submission(json!({
            "name": "A",
            "email": "a@x.com",
            "message": "hi",
            "subject": "Opening hours",
            "source": "footer"
        })))
        .unwrap()
        .into_record(EnquiryId::generate(), created_at);

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["type"], "general_enquiry");
        assert_eq!(value["createdAt"], "2026-03-01T10:00:00Z");
        assert_eq!(value["subject"], "Opening hours");
        assert_eq!(value["source"], "footer");
        assert!(value.get("phone").is_none());

        let back: Enquiry = serde_json::from_value(value).unwrap();
        assert_eq!(back, record);
    }
}
