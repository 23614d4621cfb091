use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};
use crate::interval::overlaps;
use crate::models::appointment::{Appointment, AppointmentStatus, BookingRequest};
use crate::models::availability::{AvailabilityRule, BlackoutDate, DateRange, Holiday};
use crate::models::settings::Settings;
use crate::store::{AvailabilityStore, BookingTransaction};

#[derive(Debug, Default)]
struct MemoryData {
    settings: Option<Settings>,
    doctors: HashSet<Uuid>,
    rules: Vec<AvailabilityRule>,
    blackout_dates: Vec<BlackoutDate>,
    holidays: Vec<Holiday>,
    appointments: Vec<Appointment>,
}

impl MemoryData {
    fn active_for(&self, doctor_id: Uuid, from: DateTime<Utc>, to: DateTime<Utc>) -> Vec<Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id && a.status.is_active())
            .filter(|a| overlaps(from, to, a.start_time, a.end_time))
            .cloned()
            .collect()
    }
}

/// Process-local store for tests and database-free development.
///
/// A per-doctor async mutex plays the part of the doctor row lock, and
/// inserts stay private to their transaction until commit.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    data: Arc<Mutex<MemoryData>>,
    doctor_locks: Arc<Mutex<HashMap<Uuid, Arc<tokio::sync::Mutex<()>>>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn data(&self) -> MutexGuard<'_, MemoryData> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_settings(&self, settings: Settings) {
        self.data().settings = Some(settings);
    }

    pub fn add_doctor(&self, doctor_id: Uuid) {
        self.data().doctors.insert(doctor_id);
    }

    pub fn add_rule(&self, rule: AvailabilityRule) {
        let mut data = self.data();
        data.doctors.insert(rule.doctor_id);
        data.rules.push(rule);
    }

    pub fn add_blackout_date(&self, blackout: BlackoutDate) {
        self.data().blackout_dates.push(blackout);
    }

    pub fn add_holiday(&self, holiday: Holiday) {
        self.data().holidays.push(holiday);
    }

    /// Seeds an appointment directly, bypassing the booking transaction.
    pub fn add_appointment(&self, appointment: Appointment) {
        self.data().appointments.push(appointment);
    }

    /// Every stored appointment of a doctor, cancelled ones included.
    pub fn appointments_for(&self, doctor_id: Uuid) -> Vec<Appointment> {
        self.data()
            .appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id)
            .cloned()
            .collect()
    }

    fn doctor_lock(&self, doctor_id: Uuid) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .doctor_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(doctor_id).or_default().clone()
    }
}

#[async_trait]
impl AvailabilityStore for InMemoryStore {
    async fn settings(&self) -> BookingResult<Option<Settings>> {
        Ok(self.data().settings.clone())
    }

    async fn availability_rules(&self, doctor_id: Uuid) -> BookingResult<Vec<AvailabilityRule>> {
        Ok(self
            .data()
            .rules
            .iter()
            .filter(|rule| rule.doctor_id == doctor_id)
            .cloned()
            .collect())
    }

    async fn blackout_dates(
        &self,
        doctor_id: Uuid,
        range: DateRange,
    ) -> BookingResult<Vec<BlackoutDate>> {
        Ok(self
            .data()
            .blackout_dates
            .iter()
            .filter(|b| b.doctor_id == doctor_id)
            .filter(|b| b.date >= range.start_date && b.date <= range.end_date)
            .cloned()
            .collect())
    }

    async fn holidays(&self, range: DateRange) -> BookingResult<Vec<Holiday>> {
        Ok(self
            .data()
            .holidays
            .iter()
            .filter(|h| h.date >= range.start_date && h.date <= range.end_date)
            .cloned()
            .collect())
    }

    async fn active_appointments(
        &self,
        doctor_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BookingResult<Vec<Appointment>> {
        Ok(self.data().active_for(doctor_id, from, to))
    }

    async fn appointment(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        Ok(self.data().appointments.iter().find(|a| a.id == id).cloned())
    }

    async fn update_appointment_status(
        &self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> BookingResult<Option<Appointment>> {
        let mut data = self.data();
        let Some(appointment) = data.appointments.iter_mut().find(|a| a.id == id) else {
            return Ok(None);
        };
        if !appointment.status.can_transition_to(status) {
            return Ok(None);
        }
        appointment.status = status;
        appointment.updated_at = Utc::now();
        Ok(Some(appointment.clone()))
    }

    async fn lock_doctor(
        &self,
        doctor_id: Uuid,
    ) -> BookingResult<Option<Box<dyn BookingTransaction>>> {
        if !self.data().doctors.contains(&doctor_id) {
            return Ok(None);
        }

        let guard = self.doctor_lock(doctor_id).lock_owned().await;
        Ok(Some(Box::new(MemoryTransaction {
            doctor_id,
            data: Arc::clone(&self.data),
            staged: Vec::new(),
            _guard: guard,
        })))
    }
}

struct MemoryTransaction {
    doctor_id: Uuid,
    data: Arc<Mutex<MemoryData>>,
    staged: Vec<Appointment>,
    _guard: OwnedMutexGuard<()>,
}

#[async_trait]
impl BookingTransaction for MemoryTransaction {
    async fn active_appointments(
        &mut self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> BookingResult<Vec<Appointment>> {
        let mut visible = self
            .data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .active_for(self.doctor_id, from, to);
        visible.extend(
            self.staged
                .iter()
                .filter(|a| overlaps(from, to, a.start_time, a.end_time))
                .cloned(),
        );
        Ok(visible)
    }

    async fn insert_appointment(&mut self, request: &BookingRequest) -> BookingResult<Appointment> {
        if request.doctor_id != self.doctor_id {
            return Err(BookingError::Internal(
                "appointment inserted under another doctor's lock".into(),
            ));
        }

        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            doctor_id: request.doctor_id,
            patient_id: request.patient_id,
            start_time: request.start_time,
            end_time: request.end_time,
            status: AppointmentStatus::Scheduled,
            reason: request.reason.clone(),
            notes: request.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.staged.push(appointment.clone());
        Ok(appointment)
    }

    async fn commit(&mut self) -> BookingResult<()> {
        let staged = std::mem::take(&mut self.staged);
        self.data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .appointments
            .extend(staged);
        Ok(())
    }
}
