use crate::models::DbDoctor;
use chrono::Utc;
use eyre::Result;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

pub async fn create_doctor(pool: &Pool<Postgres>, name: &str) -> Result<DbDoctor> {
    let doctor = sqlx::query_as::<_, DbDoctor>(
        r#"
        INSERT INTO doctors (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(doctor)
}

/// Takes the exclusive row lock on a doctor for the rest of the enclosing
/// transaction. Returns `false` when the doctor does not exist.
pub async fn lock_doctor(conn: &mut PgConnection, id: Uuid) -> Result<bool> {
    let locked = sqlx::query_scalar::<_, Uuid>(
        r#"
        SELECT id
        FROM doctors
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await?;

    Ok(locked.is_some())
}
