//! Conversion between civil (wall-clock) time in a configured zone and
//! absolute UTC instants. Everything downstream of the generator compares
//! instants only.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolves a wall-clock time in `tz` to a UTC instant.
///
/// Ambiguous times (clocks falling back) resolve to the earlier instant.
/// Times skipped by a forward transition do not exist and yield `None`.
pub fn civil_to_utc(date: NaiveDate, time: NaiveTime, tz: Tz) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&date.and_time(time)) {
        LocalResult::Single(local) => Some(local.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.with_timezone(&Utc)),
        LocalResult::None => None,
    }
}

/// Calendar date of an instant as seen on a wall clock in `tz`.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}
