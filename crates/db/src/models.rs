use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::eyre;
use serde::{Deserialize, Serialize};
use slotbook_core::errors::BookingError;
use slotbook_core::models::appointment::Appointment;
use slotbook_core::models::availability::{AvailabilityRule, BlackoutDate, Holiday};
use slotbook_core::models::settings::{Settings, parse_timezone};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityRule {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub slot_duration_minutes: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbBlackoutDate {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbHoliday {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSettings {
    pub id: i16,
    pub business_hours_start: NaiveTime,
    pub business_hours_end: NaiveTime,
    pub timezone: String,
    pub slot_duration_minutes: i32,
    pub min_booking_notice_hours: i32,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub patient_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: String,
    pub reason: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<DbAvailabilityRule> for AvailabilityRule {
    type Error = BookingError;

    fn try_from(row: DbAvailabilityRule) -> Result<Self, Self::Error> {
        let day_of_week = u8::try_from(row.day_of_week)
            .map_err(|_| eyre!("rule {} has day_of_week {}", row.id, row.day_of_week))?;
        let slot_duration_minutes = row
            .slot_duration_minutes
            .map(u32::try_from)
            .transpose()
            .map_err(|_| eyre!("rule {} has a negative slot duration", row.id))?;

        Ok(AvailabilityRule {
            id: row.id,
            doctor_id: row.doctor_id,
            day_of_week,
            start_time: row.start_time,
            end_time: row.end_time,
            slot_duration_minutes,
        })
    }
}

impl From<DbBlackoutDate> for BlackoutDate {
    fn from(row: DbBlackoutDate) -> Self {
        BlackoutDate {
            id: row.id,
            doctor_id: row.doctor_id,
            date: row.date,
            reason: row.reason,
        }
    }
}

impl From<DbHoliday> for Holiday {
    fn from(row: DbHoliday) -> Self {
        Holiday {
            id: row.id,
            date: row.date,
            description: row.description,
        }
    }
}

impl TryFrom<DbSettings> for Settings {
    type Error = BookingError;

    fn try_from(row: DbSettings) -> Result<Self, Self::Error> {
        let settings = Settings {
            business_hours_start: row.business_hours_start,
            business_hours_end: row.business_hours_end,
            timezone: parse_timezone(&row.timezone)?,
            slot_duration_minutes: u32::try_from(row.slot_duration_minutes)
                .map_err(|_| eyre!("negative default slot duration"))?,
            min_booking_notice_hours: u32::try_from(row.min_booking_notice_hours)
                .map_err(|_| eyre!("negative minimum booking notice"))?,
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = BookingError;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        Ok(Appointment {
            id: row.id,
            doctor_id: row.doctor_id,
            patient_id: row.patient_id,
            start_time: row.start_time,
            end_time: row.end_time,
            status: row.status.parse()?,
            reason: row.reason,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
