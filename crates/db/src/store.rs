use async_trait::async_trait;
use chrono::{DateTime, Utc};
use eyre::WrapErr;
use slotbook_core::errors::{BookingError, BookingResult};
use slotbook_core::models::appointment::{Appointment, AppointmentStatus, BookingRequest};
use slotbook_core::models::availability::{AvailabilityRule, BlackoutDate, DateRange, Holiday};
use slotbook_core::models::settings::Settings;
use slotbook_core::store::{AvailabilityStore, BookingTransaction};
use sqlx::{Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::DbPool;
use crate::repositories::{appointment, availability, doctor, settings};

/// [`AvailabilityStore`] over a PostgreSQL pool.
///
/// Bookings serialize per doctor on `SELECT ... FOR UPDATE` of the doctor row.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn into_appointments(rows: Vec<crate::models::DbAppointment>) -> BookingResult<Vec<Appointment>> {
    rows.into_iter().map(Appointment::try_from).collect()
}

#[async_trait]
impl AvailabilityStore for PgStore {
    async fn settings(&self) -> BookingResult<Option<Settings>> {
        settings::get_settings(&self.pool)
            .await?
            .map(Settings::try_from)
            .transpose()
    }

    async fn availability_rules(&self, doctor_id: Uuid) -> BookingResult<Vec<AvailabilityRule>> {
        availability::get_rules_by_doctor_id(&self.pool, doctor_id)
            .await?
            .into_iter()
            .map(AvailabilityRule::try_from)
            .collect()
    }

    async fn blackout_dates(
        &self,
        doctor_id: Uuid,
        range: DateRange,
    ) -> BookingResult<Vec<BlackoutDate>> {
        let rows = availability::get_blackout_dates_in_range(
            &self.pool,
            doctor_id,
            range.start_date,
            range.end_date,
        )
        .await?;

        Ok(rows.into_iter().map(BlackoutDate::from).collect())
    }

    async fn holidays(&self, range: DateRange) -> BookingResult<Vec<Holiday>> {
        let rows =
            availability::get_holidays_in_range(&self.pool, range.start_date, range.end_date)
                .await?;

        Ok(rows.into_iter().map(Holiday::from).collect())
    }

    async fn active_appointments(
        &self,
        doctor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BookingResult<Vec<Appointment>> {
        let rows =
            appointment::get_active_appointments_in_range(&self.pool, doctor_id, from, to).await?;
        into_appointments(rows)
    }

    async fn appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.pool, id)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> BookingResult<Option<Appointment>> {
        appointment::update_appointment_status(&self.pool, id, status)
            .await?
            .map(Appointment::try_from)
            .transpose()
    }

    async fn lock_doctor(
        &self,
        doctor_id: Uuid,
    ) -> BookingResult<Option<Box<dyn BookingTransaction>>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .wrap_err("Failed to begin booking transaction")?;

        if !doctor::lock_doctor(&mut *tx, doctor_id).await? {
            tx.rollback()
                .await
                .wrap_err("Failed to roll back booking transaction")?;
            return Ok(None);
        }

        debug!("Locked doctor {} for booking", doctor_id);
        Ok(Some(Box::new(PgBookingTransaction {
            doctor_id,
            tx: Some(tx),
        })))
    }
}

/// Open transaction holding the doctor row lock. Dropping it before
/// [`BookingTransaction::commit`] rolls everything back.
pub struct PgBookingTransaction {
    doctor_id: Uuid,
    tx: Option<Transaction<'static, Postgres>>,
}

impl PgBookingTransaction {
    fn tx(&mut self) -> BookingResult<&mut Transaction<'static, Postgres>> {
        self.tx.as_mut().ok_or_else(|| {
            BookingError::Internal("booking transaction already committed".into())
        })
    }
}

#[async_trait]
impl BookingTransaction for PgBookingTransaction {
    async fn active_appointments(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BookingResult<Vec<Appointment>> {
        let doctor_id = self.doctor_id;
        let tx = self.tx()?;
        let rows =
            appointment::get_active_appointments_in_range(&mut **tx, doctor_id, from, to).await?;
        into_appointments(rows)
    }

    async fn insert_appointment(&mut self, request: &BookingRequest) -> BookingResult<Appointment> {
        let tx = self.tx()?;
        let row = appointment::create_appointment(&mut **tx, request).await?;
        debug!("Inserted appointment {} inside booking transaction", row.id);
        Appointment::try_from(row)
    }

    async fn commit(&mut self) -> BookingResult<()> {
        let tx = self.tx.take().ok_or_else(|| {
            BookingError::Internal("booking transaction already committed".into())
        })?;
        tx.commit()
            .await
            .wrap_err("Failed to commit booking transaction")?;
        Ok(())
    }
}
