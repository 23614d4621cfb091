use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A bookable window. Derived on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub available: bool,
}

impl TimeSlot {
    pub fn new(start_time: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            start_time,
            end_time: start_time + duration,
            available: true,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }
}
