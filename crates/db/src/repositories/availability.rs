use crate::models::{DbAvailabilityRule, DbBlackoutDate, DbHoliday};
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn get_rules_by_doctor_id(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
) -> Result<Vec<DbAvailabilityRule>> {
    let rules = sqlx::query_as::<_, DbAvailabilityRule>(
        r#"
        SELECT id, doctor_id, day_of_week, start_time, end_time, slot_duration_minutes, created_at
        FROM availability_rules
        WHERE doctor_id = $1
        ORDER BY day_of_week ASC, start_time ASC
        "#,
    )
    .bind(doctor_id)
    .fetch_all(pool)
    .await?;

    Ok(rules)
}

pub async fn get_blackout_dates_in_range(
    pool: &Pool<Postgres>,
    doctor_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<DbBlackoutDate>> {
    let blackout_dates = sqlx::query_as::<_, DbBlackoutDate>(
        r#"
        SELECT id, doctor_id, date, reason, created_at
        FROM blackout_dates
        WHERE doctor_id = $1 AND date BETWEEN $2 AND $3
        ORDER BY date ASC
        "#,
    )
    .bind(doctor_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await?;

    Ok(blackout_dates)
}

pub async fn get_holidays_in_range(
    pool: &Pool<Postgres>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<Vec<DbHoliday>> {
    let holidays = sqlx::query_as::<_, DbHoliday>(
        r#"
        SELECT id, date, description, created_at
        FROM holidays
        WHERE date BETWEEN $1 AND $2
        ORDER BY date ASC
        "#,
    )
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await?;

    Ok(holidays)
}
