use chrono::{Datelike, Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

/// A recurring weekly opening window for a doctor.
///
/// `day_of_week` counts from Sunday (0) to Saturday (6).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    /// Falls back to the global default when unset.
    pub slot_duration_minutes: Option<u32>,
}

impl AvailabilityRule {
    pub fn is_valid(&self) -> bool {
        self.day_of_week <= 6
            && self.start_time < self.end_time
            && self.slot_duration_minutes.is_none_or(|m| m > 0)
    }

    pub fn applies_to(&self, date: NaiveDate) -> bool {
        u32::from(self.day_of_week) == date.weekday().num_days_from_sunday()
    }

    pub fn slot_duration(&self, default_minutes: u32) -> Duration {
        Duration::minutes(i64::from(
            self.slot_duration_minutes.unwrap_or(default_minutes),
        ))
    }
}

/// A single calendar day on which one doctor takes no bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlackoutDate {
    pub id: Uuid,
    pub doctor_id: Uuid,
    pub date: NaiveDate,
    pub reason: Option<String>,
}

/// A calendar day on which no doctor takes bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: Uuid,
    pub date: NaiveDate,
    pub description: String,
}

/// Inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> BookingResult<Self> {
        if end_date < start_date {
            return Err(BookingError::Validation(
                "end_date must not be before start_date".to_string(),
            ));
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Number of calendar days covered, counting both ends.
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Every date from `start_date` through `end_date`, both included, even
    /// when `end_date` is the last representable date.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end_date = self.end_date;
        std::iter::successors(
            Some(self.start_date).filter(|day| *day <= end_date),
            move |day| day.succ_opt().filter(|next| *next <= end_date),
        )
    }
}
