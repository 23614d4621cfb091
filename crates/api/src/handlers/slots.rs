//! # Slot Handlers
//!
//! Bookable slot listing for one doctor over an inclusive range of calendar
//! dates. Every returned slot is free: rule windows, closed days, the
//! minimum notice and existing appointments are already applied.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use chrono::NaiveDate;
use serde::Deserialize;
use slotbook_core::errors::BookingError;
use slotbook_core::models::availability::DateRange;
use slotbook_core::models::time_slot::TimeSlot;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Query parameters for the slot listing endpoint
///
/// Fields are taken as strings so malformed values are reported with the
/// offending parameter name.
#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub doctor_id: String,
    /// Inclusive, `YYYY-MM-DD`
    pub start_date: String,
    /// Inclusive, `YYYY-MM-DD`
    pub end_date: String,
}

fn parse_date(name: &str, value: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        BookingError::Validation(format!("Invalid {}: expected YYYY-MM-DD, got {}", name, value))
    })
}

/// Lists the free slots of a doctor
///
/// # Endpoint
///
/// ```text
/// GET /api/slots?doctor_id=<uuid>&start_date=2024-07-15&end_date=2024-07-19
/// ```
///
/// # Errors
///
/// * `400 Bad Request` - Malformed doctor id or dates, `end_date` before
///   `start_date`, or a range longer than the configured maximum
/// * `500 Internal Server Error` - Storage failure
pub async fn list_slots(
    State(state): State<Arc<ApiState>>,
    query: Result<Query<SlotQuery>, QueryRejection>,
) -> Result<Json<Vec<TimeSlot>>, AppError> {
    let Query(query) = query?;

    let doctor_id = Uuid::parse_str(query.doctor_id.trim()).map_err(|_| {
        BookingError::Validation(format!("Invalid doctor_id: {}", query.doctor_id))
    })?;
    let start_date = parse_date("start_date", &query.start_date)?;
    let end_date = parse_date("end_date", &query.end_date)?;
    let range = DateRange::new(start_date, end_date)?;

    let slots = state.slots.list_slots(doctor_id, range).await?;

    Ok(Json(slots))
}
