//! Expansion of weekly availability rules into candidate slots.

use chrono::Duration;
use chrono_tz::Tz;
use tracing::warn;

use crate::models::availability::{AvailabilityRule, DateRange};
use crate::models::time_slot::TimeSlot;
use crate::timezone::civil_to_utc;

/// Expands `rules` into fixed-length candidate slots for every day of
/// `range`, reading rule times as wall-clock times in `tz`.
///
/// A trailing window shorter than the slot length is dropped rather than
/// truncated. Overlapping rules may emit overlapping candidates; conflict
/// handling belongs to the filter and the booking transaction. Wall-clock
/// starts that do not exist in `tz` (spring-forward gaps) are skipped.
///
/// Output is ordered by start time and identical for identical inputs.
pub fn generate(
    rules: &[AvailabilityRule],
    range: DateRange,
    default_slot_minutes: u32,
    tz: Tz,
) -> Vec<TimeSlot> {
    let mut slots = Vec::new();

    for day in range.days() {
        let mut day_rules: Vec<&AvailabilityRule> =
            rules.iter().filter(|rule| rule.applies_to(day)).collect();
        day_rules.sort_by_key(|rule| (rule.start_time, rule.end_time));

        for rule in day_rules {
            let step = rule.slot_duration(default_slot_minutes);
            if !rule.is_valid() || step <= Duration::zero() {
                warn!(rule_id = %rule.id, doctor_id = %rule.doctor_id, "Skipping invalid availability rule");
                continue;
            }

            let window_end = day.and_time(rule.end_time);
            let mut cursor = day.and_time(rule.start_time);
            while cursor + step <= window_end {
                if let Some(start) = civil_to_utc(cursor.date(), cursor.time(), tz) {
                    slots.push(TimeSlot::new(start, step));
                }
                cursor += step;
            }
        }
    }

    slots.sort_by_key(|slot| slot.start_time);
    slots
}
