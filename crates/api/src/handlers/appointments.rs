use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use slotbook_core::models::appointment::{Appointment, BookingRequest, UpdateStatusRequest};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Books a slot
///
/// # Endpoint
///
/// ```text
/// POST /api/appointments
/// ```
///
/// Returns `201 Created` with the new appointment in status `scheduled`.
///
/// # Errors
///
/// * `400 Bad Request` - Malformed body, `end_time` not after `start_time`,
///   or a start inside the minimum booking notice
/// * `404 Not Found` - Unknown doctor
/// * `409 Conflict` - The window overlaps an active appointment
/// * `500 Internal Server Error` - Storage failure or transaction timeout
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let Json(request) = payload?;

    let appointment = state.bookings.book(request).await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// Fetches one appointment
///
/// ```text
/// GET /api/appointments/:id
/// ```
pub async fn get_appointment(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Appointment>, AppError> {
    let Path(id) = id?;

    let appointment = state.bookings.appointment(id).await?;

    Ok(Json(appointment))
}

/// Moves an appointment to a new status
///
/// ```text
/// PATCH /api/appointments/:id/status
/// { "status": "confirmed" }
/// ```
///
/// A cancelled appointment cannot be moved back to an active status (`400`).
pub async fn update_appointment_status(
    State(state): State<Arc<ApiState>>,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<UpdateStatusRequest>, JsonRejection>,
) -> Result<Json<Appointment>, AppError> {
    let Path(id) = id?;
    let Json(request) = payload?;

    let appointment = state.bookings.update_status(id, request.status).await?;

    Ok(Json(appointment))
}
