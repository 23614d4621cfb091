//! Exclusion of candidate slots that cannot be booked.
//!
//! The result is a snapshot. It does not reserve anything; the booking
//! transaction re-checks conflicts under the doctor lock.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::interval::find_conflict;
use crate::models::appointment::Appointment;
use crate::models::availability::{BlackoutDate, Holiday};
use crate::models::settings::Settings;
use crate::models::time_slot::TimeSlot;
use crate::timezone::local_date;

/// Keeps the candidates that pass every exclusion rule, in their original
/// order. A slot is dropped when it starts before `now` plus the minimum
/// booking notice, when its local start date is a blackout date or a
/// holiday, or when it overlaps an active appointment.
///
/// Blackout dates and appointments are expected to be scoped to the doctor
/// the candidates were generated for.
pub fn filter(
    candidates: &[TimeSlot],
    blackout_dates: &[BlackoutDate],
    holidays: &[Holiday],
    appointments: &[Appointment],
    settings: &Settings,
    now: DateTime<Utc>,
) -> Vec<TimeSlot> {
    let earliest_start = now + settings.min_booking_notice();
    let closed_days: HashSet<NaiveDate> = blackout_dates
        .iter()
        .map(|blackout| blackout.date)
        .chain(holidays.iter().map(|holiday| holiday.date))
        .collect();

    candidates
        .iter()
        .filter(|slot| slot.start_time >= earliest_start)
        .filter(|slot| !closed_days.contains(&local_date(slot.start_time, settings.timezone)))
        .filter(|slot| find_conflict(slot.start_time, slot.end_time, appointments).is_none())
        .cloned()
        .collect()
}
