use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Doctors are owned by the profile tooling; bookings lock these rows.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create availability_rules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS availability_rules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doctor_id UUID NOT NULL REFERENCES doctors(id),
            day_of_week SMALLINT NOT NULL,
            start_time TIME NOT NULL,
            end_time TIME NOT NULL,
            slot_duration_minutes INTEGER NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_day_of_week CHECK (day_of_week BETWEEN 0 AND 6),
            CONSTRAINT valid_window CHECK (start_time < end_time),
            CONSTRAINT valid_slot_duration CHECK (slot_duration_minutes IS NULL OR slot_duration_minutes > 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create blackout_dates table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blackout_dates (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doctor_id UUID NOT NULL REFERENCES doctors(id),
            date DATE NOT NULL,
            reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            UNIQUE (doctor_id, date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create holidays table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS holidays (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            date DATE NOT NULL UNIQUE,
            description VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Single-row settings table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS settings (
            id SMALLINT PRIMARY KEY DEFAULT 1,
            business_hours_start TIME NOT NULL DEFAULT '09:00',
            business_hours_end TIME NOT NULL DEFAULT '17:00',
            timezone VARCHAR(64) NOT NULL DEFAULT 'UTC',
            slot_duration_minutes INTEGER NOT NULL DEFAULT 30,
            min_booking_notice_hours INTEGER NOT NULL DEFAULT 2,
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT single_row CHECK (id = 1),
            CONSTRAINT valid_business_hours CHECK (business_hours_start < business_hours_end),
            CONSTRAINT valid_default_slot CHECK (slot_duration_minutes > 0),
            CONSTRAINT valid_notice CHECK (min_booking_notice_hours >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("INSERT INTO settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
        .execute(pool)
        .await?;

    // Create appointments table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS appointments (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            doctor_id UUID NOT NULL REFERENCES doctors(id),
            patient_id UUID NOT NULL,
            start_time TIMESTAMP WITH TIME ZONE NOT NULL,
            end_time TIMESTAMP WITH TIME ZONE NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'scheduled',
            reason TEXT NULL,
            notes TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (end_time > start_time),
            CONSTRAINT valid_status CHECK (status IN ('scheduled', 'confirmed', 'cancelled', 'completed'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    for statement in [
        "CREATE INDEX IF NOT EXISTS idx_availability_rules_doctor_day ON availability_rules(doctor_id, day_of_week)",
        "CREATE INDEX IF NOT EXISTS idx_blackout_dates_doctor_date ON blackout_dates(doctor_id, date)",
        "CREATE INDEX IF NOT EXISTS idx_holidays_date ON holidays(date)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_doctor_start ON appointments(doctor_id, start_time)",
        "CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments(patient_id)",
    ] {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
