use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockall::mock;
use slotbook_core::errors::BookingResult;
use slotbook_core::models::appointment::{Appointment, AppointmentStatus};
use slotbook_core::models::availability::{AvailabilityRule, BlackoutDate, DateRange, Holiday};
use slotbook_core::models::settings::Settings;
use slotbook_core::store::{AvailabilityStore, BookingTransaction};
use uuid::Uuid;

// Mock store for testing
mock! {
    pub Store {}

    #[async_trait]
    impl AvailabilityStore for Store {
        async fn settings(&self) -> BookingResult<Option<Settings>>;

        async fn availability_rules(&self, doctor_id: Uuid) -> BookingResult<Vec<AvailabilityRule>>;

        async fn blackout_dates(
            &self,
            doctor_id: Uuid,
            range: DateRange,
        ) -> BookingResult<Vec<BlackoutDate>>;

        async fn holidays(&self, range: DateRange) -> BookingResult<Vec<Holiday>>;

        async fn active_appointments(
            &self,
            doctor_id: Uuid,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> BookingResult<Vec<Appointment>>;

        async fn appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

        async fn update_appointment_status(
            &self,
            id: Uuid,
            status: AppointmentStatus,
        ) -> BookingResult<Option<Appointment>>;

        async fn lock_doctor(
            &self,
            doctor_id: Uuid,
        ) -> BookingResult<Option<Box<dyn BookingTransaction>>>;
    }
}
