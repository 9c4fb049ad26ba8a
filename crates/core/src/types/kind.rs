//! The two record collections accepted by the intake service.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Which collection a submitted record belongs to.
///
/// Each kind carries its own schema: the fields a submission must provide and
/// the `type` value stamped on records that do not name one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// General enquiry from the contact form.
    Enquiry,
    /// Appointment request from the booking form.
    Appointment,
}

impl RecordKind {
    /// Every kind, in routing-table order.
    pub const ALL: [Self; 2] = [Self::Enquiry, Self::Appointment];

    /// Storage collection (table) name.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Enquiry => "enquiry",
            Self::Appointment => "appointment",
        }
    }

    /// Value of the `type` field when the submission does not provide one.
    #[must_use]
    pub const fn default_type(self) -> &'static str {
        match self {
            Self::Enquiry => "general_enquiry",
            Self::Appointment => "appointment_request",
        }
    }

    /// Fields that must be present and non-empty, in wire (camelCase) form.
    #[must_use]
    pub const fn required_fields(self) -> &'static [&'static str] {
        match self {
            Self::Enquiry => &["name", "email", "message"],
            Self::Appointment => &[
                "name",
                "email",
                "phone",
                "preferredDate",
                "preferredTime",
                "purpose",
            ],
        }
    }

    /// Human-readable label used in response messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Enquiry => "Enquiry",
            Self::Appointment => "Appointment request",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}
