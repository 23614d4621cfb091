//! Storage seam between the booking engine and whatever persists doctors,
//! rules, exceptions and appointments.

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::errors::BookingResult;
use crate::models::appointment::{Appointment, AppointmentStatus, BookingRequest};
use crate::models::availability::{AvailabilityRule, BlackoutDate, DateRange, Holiday};
use crate::models::settings::Settings;

/// Read queries and the locked write path the engine depends on.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    /// The stored settings row, if one exists.
    async fn settings(&self) -> BookingResult<Option<Settings>>;

    async fn availability_rules(&self, doctor_id: Uuid) -> BookingResult<Vec<AvailabilityRule>>;

    async fn blackout_dates(
        &self,
        doctor_id: Uuid,
        range: DateRange,
    ) -> BookingResult<Vec<BlackoutDate>>;

    async fn holidays(&self, range: DateRange) -> BookingResult<Vec<Holiday>>;

    /// Non-cancelled appointments of `doctor_id` intersecting `[from, to)`.
    async fn active_appointments(
        &self,
        doctor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BookingResult<Vec<Appointment>>;

    async fn appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

    /// Sets the status of one appointment without any overlap check.
    ///
    /// Returns `None` when the appointment does not exist or when it is
    /// cancelled and `status` is active; cancelled rows are never revived.
    async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> BookingResult<Option<Appointment>>;

    /// Opens a transaction holding the exclusive lock on `doctor_id`.
    ///
    /// Returns `None` when the doctor does not exist. The lock is held until
    /// the returned transaction is committed or dropped; dropping it without
    /// a commit discards every staged write.
    async fn lock_doctor(&self, doctor_id: Uuid)
    -> BookingResult<Option<Box<dyn BookingTransaction>>>;
}

/// Unit of work opened by [`AvailabilityStore::lock_doctor`].
#[async_trait]
pub trait BookingTransaction: Send {
    /// Non-cancelled appointments of the locked doctor intersecting
    /// `[from, to)`, as visible inside this transaction.
    async fn active_appointments(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BookingResult<Vec<Appointment>>;

    /// Stages a new appointment with status `scheduled`.
    async fn insert_appointment(&mut self, request: &BookingRequest) -> BookingResult<Appointment>;

    async fn commit(&mut self) -> BookingResult<()>;
}
