//! Enquiry route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use form_intake_core::RecordKind;

use super::{CreatedResponse, ListResponse};
use crate::db::EnquiryRepository;
use crate::error::{AppError, Result};
use crate::extract::FormBody;
use crate::models::{Enquiry, NewEnquiry};
use crate::state::AppState;

/// Store a submitted enquiry.
#[instrument(skip(state, submission))]
pub async fn create(
    State(state): State<AppState>,
    FormBody(submission): FormBody,
) -> Result<CreatedResponse> {
    let enquiry =
        NewEnquiry::from_submission(submission).map_err(|source| AppError::Submission {
            kind: RecordKind::Enquiry,
            source,
        })?;

    let record = EnquiryRepository::new(state.store())
        .create(enquiry)
        .await
        .map_err(|source| AppError::Create {
            kind: RecordKind::Enquiry,
            source,
        })?;

    tracing::info!(id = %record.id, "Enquiry stored");
    Ok(CreatedResponse::new("Enquiry submitted successfully", record.id))
}

/// List every enquiry, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<Enquiry>>> {
    let enquiries = EnquiryRepository::new(state.store())
        .list()
        .await
        .map_err(|source| AppError::List {
            kind: RecordKind::Enquiry,
            source,
        })?;

    Ok(Json(ListResponse::new(enquiries)))
}
