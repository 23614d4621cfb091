use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::filter::filter;
use crate::generator::generate;
use crate::models::availability::DateRange;
use crate::models::settings::Settings;
use crate::models::time_slot::TimeSlot;
use crate::services::Clock;
use crate::store::AvailabilityStore;

/// Lists bookable slots for one doctor. Takes no locks; the answer may be
/// stale by the time a client books from it.
pub struct SlotQueryService {
    store: Arc<dyn AvailabilityStore>,
    settings: Settings,
    clock: Arc<dyn Clock>,
    max_range_days: i64,
}

impl SlotQueryService {
    pub fn new(
        store: Arc<dyn AvailabilityStore>,
        settings: Settings,
        clock: Arc<dyn Clock>,
        max_range_days: i64,
    ) -> Self {
        Self {
            store,
            settings,
            clock,
            max_range_days,
        }
    }

    pub async fn list_slots(&self, doctor_id: Uuid, range: DateRange) -> BookingResult<Vec<TimeSlot>> {
        if range.num_days() > self.max_range_days {
            return Err(BookingError::Validation(format!(
                "date range may span at most {} days",
                self.max_range_days
            )));
        }

        let rules = self.store.availability_rules(doctor_id).await?;
        let candidates = generate(
            &rules,
            range,
            self.settings.slot_duration_minutes,
            self.settings.timezone,
        );

        // Appointments only matter where candidates exist.
        let (Some(first), Some(last_end)) = (
            candidates.first(),
            candidates.iter().map(|slot| slot.end_time).max(),
        ) else {
            debug!(%doctor_id, rules = rules.len(), "No candidate slots in range");
            return Ok(Vec::new());
        };

        let (blackout_dates, holidays, appointments) = tokio::try_join!(
            self.store.blackout_dates(doctor_id, range),
            self.store.holidays(range),
            self.store
                .active_appointments(doctor_id, first.start_time, last_end),
        )?;

        let slots = filter(
            &candidates,
            &blackout_dates,
            &holidays,
            &appointments,
            &self.settings,
            self.clock.now(),
        );

        debug!(
            %doctor_id,
            candidates = candidates.len(),
            available = slots.len(),
            "Computed available slots"
        );
        Ok(slots)
    }
}
