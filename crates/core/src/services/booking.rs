use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::interval::find_conflict;
use crate::models::appointment::{Appointment, AppointmentStatus, BookingRequest};
use crate::models::settings::Settings;
use crate::services::Clock;
use crate::store::AvailabilityStore;

/// Longest accepted `reason` or `notes` text, in characters.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Creates appointments under the doctor lock and applies status changes.
pub struct BookingService {
    store: Arc<dyn AvailabilityStore>,
    settings: Settings,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl BookingService {
    pub fn new(
        store: Arc<dyn AvailabilityStore>,
        settings: Settings,
        clock: Arc<dyn Clock>,
        timeout: Duration,
    ) -> Self {
        Self {
            store,
            settings,
            clock,
            timeout,
        }
    }

    /// Checks a request without touching the store.
    pub fn validate(&self, request: &BookingRequest) -> BookingResult<()> {
        if request.doctor_id.is_nil() {
            return Err(BookingError::Validation("doctor_id must not be nil".to_string()));
        }
        if request.patient_id.is_nil() {
            return Err(BookingError::Validation("patient_id must not be nil".to_string()));
        }
        if request.end_time <= request.start_time {
            return Err(BookingError::Validation(
                "end_time must be after start_time".to_string(),
            ));
        }
        for (field, text) in [("reason", &request.reason), ("notes", &request.notes)] {
            if text.as_ref().is_some_and(|t| t.chars().count() > MAX_TEXT_LENGTH) {
                return Err(BookingError::Validation(format!(
                    "{} must be at most {} characters",
                    field, MAX_TEXT_LENGTH
                )));
            }
        }

        let earliest_start = self.clock.now() + self.settings.min_booking_notice();
        if request.start_time < earliest_start {
            return Err(BookingError::Validation(format!(
                "start_time must be at least {} hours from now",
                self.settings.min_booking_notice_hours
            )));
        }
        Ok(())
    }

    /// Books `request` or reports why not.
    ///
    /// The conflict check and the insert run inside one transaction holding
    /// the doctor lock, so concurrent bookings for the same doctor serialize
    /// and the later one sees the earlier one's row. The whole transaction is
    /// bounded by the configured timeout; on expiry it is rolled back and
    /// reported as an internal error.
    pub async fn book(&self, request: BookingRequest) -> BookingResult<Appointment> {
        self.validate(&request)?;

        let appointment = tokio::time::timeout(self.timeout, self.book_locked(&request))
            .await
            .map_err(|_| {
                BookingError::Internal(
                    format!("booking transaction timed out after {:?}", self.timeout).into(),
                )
            })??;

        info!(
            appointment_id = %appointment.id,
            doctor_id = %appointment.doctor_id,
            start_time = %appointment.start_time,
            "Appointment booked"
        );
        Ok(appointment)
    }

    async fn book_locked(&self, request: &BookingRequest) -> BookingResult<Appointment> {
        let mut tx = self
            .store
            .lock_doctor(request.doctor_id)
            .await?
            .ok_or(BookingError::DoctorNotFound(request.doctor_id))?;

        let existing = tx
            .active_appointments(request.start_time, request.end_time)
            .await?;
        if let Some(conflict) = find_conflict(request.start_time, request.end_time, &existing) {
            info!(
                doctor_id = %request.doctor_id,
                conflicting_appointment_id = %conflict.id,
                "Booking rejected: slot already taken"
            );
            return Err(BookingError::SlotConflict {
                start_time: request.start_time,
                end_time: request.end_time,
            });
        }

        let appointment = tx.insert_appointment(request).await?;
        tx.commit().await?;
        Ok(appointment)
    }

    pub async fn appointment(&self, id: Uuid) -> BookingResult<Appointment> {
        self.store
            .appointment(id)
            .await?
            .ok_or_else(|| BookingError::NotFound(format!("Appointment with ID {} not found", id)))
    }

    /// Direct status update with no overlap re-check.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> BookingResult<Appointment> {
        if let Some(updated) = self.store.update_appointment_status(id, status).await? {
            info!(appointment_id = %id, %status, "Appointment status updated");
            return Ok(updated);
        }

        // Nothing changed: either the row is missing or the transition was refused.
        let current = self.appointment(id).await?;
        Err(BookingError::Validation(format!(
            "cannot change status from {} to {}",
            current.status, status
        )))
    }
}
