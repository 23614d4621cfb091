#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration as StdDuration;

use axum_test::TestServer;
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use slotbook_api::{ApiState, app};
use slotbook_core::models::appointment::{Appointment, AppointmentStatus};
use slotbook_core::models::availability::AvailabilityRule;
use slotbook_core::models::settings::Settings;
use slotbook_core::services::FixedClock;
use slotbook_core::store::AvailabilityStore;
use slotbook_core::store::memory::InMemoryStore;
use uuid::Uuid;

pub const MAX_RANGE_DAYS: i64 = 31;

/// Wednesday 2024-07-10 08:00 UTC.
pub fn now() -> DateTime<Utc> {
    utc(2024, 7, 10, 8, 0)
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn build_server(store: Arc<dyn AvailabilityStore>) -> TestServer {
    let state = Arc::new(ApiState::new(
        store,
        Settings::default(),
        Arc::new(FixedClock(now())),
        StdDuration::from_secs(5),
        MAX_RANGE_DAYS,
    ));
    TestServer::new(app(state)).unwrap()
}

pub struct TestContext {
    pub store: InMemoryStore,
    pub doctor_id: Uuid,
}

impl TestContext {
    /// One doctor working Mondays 09:00-12:00 UTC in 30 minute slots.
    pub fn new() -> Self {
        let store = InMemoryStore::new();
        let doctor_id = Uuid::new_v4();
        store.add_rule(AvailabilityRule {
            id: Uuid::new_v4(),
            doctor_id,
            day_of_week: 1,
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            slot_duration_minutes: None,
        });
        Self { store, doctor_id }
    }

    pub fn server(&self) -> TestServer {
        build_server(Arc::new(self.store.clone()))
    }

    pub fn add_appointment(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        status: AppointmentStatus,
    ) -> Appointment {
        let appointment = Appointment {
            id: Uuid::new_v4(),
            doctor_id: self.doctor_id,
            patient_id: Uuid::new_v4(),
            start_time,
            end_time,
            status,
            reason: None,
            notes: None,
            created_at: now(),
            updated_at: now(),
        };
        self.store.add_appointment(appointment.clone());
        appointment
    }
}
