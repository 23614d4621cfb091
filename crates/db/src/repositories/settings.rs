use crate::models::DbSettings;
use eyre::Result;
use sqlx::{Pool, Postgres};

pub async fn get_settings(pool: &Pool<Postgres>) -> Result<Option<DbSettings>> {
    let settings = sqlx::query_as::<_, DbSettings>(
        r#"
        SELECT id, business_hours_start, business_hours_end, timezone,
               slot_duration_minutes, min_booking_notice_hours, updated_at
        FROM settings
        WHERE id = 1
        "#,
    )
    .fetch_optional(pool)
    .await?;

    Ok(settings)
}
