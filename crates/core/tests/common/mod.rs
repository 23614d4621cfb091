#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use slotbook_core::models::appointment::{Appointment, AppointmentStatus, BookingRequest};
use slotbook_core::models::availability::{AvailabilityRule, BlackoutDate, Holiday};
use uuid::Uuid;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn rule(
    doctor_id: Uuid,
    day_of_week: u8,
    start: NaiveTime,
    end: NaiveTime,
    slot_minutes: Option<u32>,
) -> AvailabilityRule {
    AvailabilityRule {
        id: Uuid::new_v4(),
        doctor_id,
        day_of_week,
        start_time: start,
        end_time: end,
        slot_duration_minutes: slot_minutes,
    }
}

pub fn blackout(doctor_id: Uuid, date: NaiveDate) -> BlackoutDate {
    BlackoutDate {
        id: Uuid::new_v4(),
        doctor_id,
        date,
        reason: Some("Conference".to_string()),
    }
}

pub fn holiday(date: NaiveDate) -> Holiday {
    Holiday {
        id: Uuid::new_v4(),
        date,
        description: "Public holiday".to_string(),
    }
}

pub fn appointment(
    doctor_id: Uuid,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    status: AppointmentStatus,
) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        doctor_id,
        patient_id: Uuid::new_v4(),
        start_time,
        end_time,
        status,
        reason: None,
        notes: None,
        created_at: start_time,
        updated_at: start_time,
    }
}

pub fn booking(doctor_id: Uuid, start_time: DateTime<Utc>, end_time: DateTime<Utc>) -> BookingRequest {
    BookingRequest {
        doctor_id,
        patient_id: Uuid::new_v4(),
        start_time,
        end_time,
        reason: Some("Checkup".to_string()),
        notes: None,
    }
}
