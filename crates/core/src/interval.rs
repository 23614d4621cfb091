//! Half-open interval arithmetic shared by the advisory slot filter and the
//! authoritative booking re-check, so both paths decide conflicts the same
//! way.

use chrono::{DateTime, Utc};

use crate::models::appointment::Appointment;

/// `[a_start, a_end)` and `[b_start, b_end)` overlap iff
/// `a_start < b_end && b_start < a_end`. Touching intervals do not overlap.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && b_start < a_end
}

/// First non-cancelled appointment whose window overlaps `[start, end)`.
pub fn find_conflict(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    appointments: &[Appointment],
) -> Option<&Appointment> {
    appointments.iter().find(|appointment| {
        appointment.status.is_active()
            && overlaps(start, end, appointment.start_time, appointment.end_time)
    })
}
