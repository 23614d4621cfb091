use chrono::{Duration, NaiveTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

/// Process-wide booking configuration.
///
/// Loaded once at startup and handed to the slot and booking services
/// explicitly; nothing reads it as ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub business_hours_start: NaiveTime,
    pub business_hours_end: NaiveTime,
    /// Zone in which availability rules are interpreted.
    pub timezone: Tz,
    /// Slot length for rules that do not set their own.
    pub slot_duration_minutes: u32,
    pub min_booking_notice_hours: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            business_hours_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            business_hours_end: NaiveTime::from_hms_opt(17, 0, 0).unwrap_or_default(),
            timezone: Tz::UTC,
            slot_duration_minutes: 30,
            min_booking_notice_hours: 2,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> BookingResult<()> {
        if self.business_hours_start >= self.business_hours_end {
            return Err(BookingError::Validation(
                "business_hours_start must be before business_hours_end".to_string(),
            ));
        }
        if self.slot_duration_minutes == 0 {
            return Err(BookingError::Validation(
                "slot_duration_minutes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn min_booking_notice(&self) -> Duration {
        Duration::hours(i64::from(self.min_booking_notice_hours))
    }
}

/// Parses an IANA zone name such as `Asia/Kolkata`.
pub fn parse_timezone(name: &str) -> BookingResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| BookingError::Validation(format!("Unknown timezone: {}", name)))
}
