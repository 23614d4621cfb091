use crate::models::DbAppointment;
use chrono::{DateTime, Utc};
use eyre::Result;
use slotbook_core::models::appointment::{AppointmentStatus, BookingRequest};
use sqlx::{PgExecutor, Pool, Postgres};
use uuid::Uuid;

/// Non-cancelled appointments of a doctor intersecting `[from, to)`.
///
/// Runs against the pool for slot listing, or inside the booking
/// transaction after the doctor lock is held.
pub async fn get_active_appointments_in_range<'e, E: PgExecutor<'e>>(
    executor: E,
    doctor_id: Uuid,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Result<Vec<DbAppointment>> {
    let appointments = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, doctor_id, patient_id, start_time, end_time, status, reason, notes,
               created_at, updated_at
        FROM appointments
        WHERE doctor_id = $1
          AND status <> 'cancelled'
          AND start_time < $3
          AND end_time > $2
        ORDER BY start_time ASC
        "#,
    )
    .bind(doctor_id)
    .bind(from)
    .bind(to)
    .fetch_all(executor)
    .await?;

    Ok(appointments)
}

pub async fn create_appointment<'e, E: PgExecutor<'e>>(
    executor: E,
    request: &BookingRequest,
) -> Result<DbAppointment> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        INSERT INTO appointments (id, doctor_id, patient_id, start_time, end_time, status,
                                  reason, notes, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING id, doctor_id, patient_id, start_time, end_time, status, reason, notes,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(request.doctor_id)
    .bind(request.patient_id)
    .bind(request.start_time)
    .bind(request.end_time)
    .bind(AppointmentStatus::Scheduled.as_str())
    .bind(request.reason.as_deref())
    .bind(request.notes.as_deref())
    .bind(now)
    .fetch_one(executor)
    .await?;

    Ok(appointment)
}

pub async fn get_appointment_by_id(
    pool: &Pool<Postgres>,
    id: Uuid,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        SELECT id, doctor_id, patient_id, start_time, end_time, status, reason, notes,
               created_at, updated_at
        FROM appointments
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}

/// Sets the status in one statement. A cancelled row only accepts
/// `cancelled` again, so no update can reopen a window without the overlap
/// check.
pub async fn update_appointment_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: AppointmentStatus,
) -> Result<Option<DbAppointment>> {
    let appointment = sqlx::query_as::<_, DbAppointment>(
        r#"
        UPDATE appointments
        SET status = $2, updated_at = $3
        WHERE id = $1
          AND (status <> 'cancelled' OR $2 = 'cancelled')
        RETURNING id, doctor_id, patient_id, start_time, end_time, status, reason, notes,
                  created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(status.as_str())
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?;

    Ok(appointment)
}
