//! Appointment request route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use form_intake_core::RecordKind;

use super::{CreatedResponse, ListResponse};
use crate::db::AppointmentRepository;
use crate::error::{AppError, Result};
use crate::extract::FormBody;
use crate::models::{Appointment, NewAppointment};
use crate::state::AppState;

/// Store a submitted appointment request.
#[instrument(skip(state, submission))]
pub async fn create(
    State(state): State<AppState>,
    FormBody(submission): FormBody,
) -> Result<CreatedResponse> {
    let appointment =
        NewAppointment::from_submission(submission).map_err(|source| AppError::Submission {
            kind: RecordKind::Appointment,
            source,
        })?;

    let record = AppointmentRepository::new(state.store())
        .create(appointment)
        .await
        .map_err(|source| AppError::Create {
            kind: RecordKind::Appointment,
            source,
        })?;

    tracing::info!(id = %record.id, preferred_date = %record.preferred_date, "Appointment request stored");
    Ok(CreatedResponse::new(
        "Appointment request submitted successfully",
        record.id,
    ))
}

/// List every appointment request, newest first.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<ListResponse<Appointment>>> {
    let appointments = AppointmentRepository::new(state.store())
        .list()
        .await
        .map_err(|source| AppError::List {
            kind: RecordKind::Appointment,
            source,
        })?;

    Ok(Json(ListResponse::new(appointments)))
}
