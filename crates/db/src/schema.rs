use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

const INDEXES: [&str; 5] = [
    "CREATE INDEX IF NOT EXISTS idx_courts_venue_id ON courts(venue_id)",
    "CREATE INDEX IF NOT EXISTS idx_courts_sport_id ON courts(sport_id)",
    "CREATE INDEX IF NOT EXISTS idx_reservations_court_window ON reservations(court_id, start_datetime, end_datetime)",
    "CREATE INDEX IF NOT EXISTS idx_reservations_user_id ON reservations(user_id)",
    "CREATE INDEX IF NOT EXISTS idx_blackout_periods_court_window ON blackout_periods(court_id, start_datetime, end_datetime)",
];

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create sports table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS sports (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL UNIQUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create venues table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            address VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create courts table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courts (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            venue_id UUID NOT NULL REFERENCES venues(id),
            sport_id UUID NOT NULL REFERENCES sports(id),
            name VARCHAR(255) NOT NULL,
            active BOOLEAN NOT NULL DEFAULT TRUE,
            open_time TIME NOT NULL,
            close_time TIME NOT NULL,
            slot_minutes INTEGER NOT NULL,
            price_per_slot NUMERIC(10, 2) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_opening_hours CHECK (close_time > open_time),
            CONSTRAINT positive_slot_minutes CHECK (slot_minutes > 0),
            CONSTRAINT non_negative_price CHECK (price_per_slot >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create users table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            email VARCHAR(255) NOT NULL UNIQUE,
            password_hash VARCHAR(255) NOT NULL,
            role VARCHAR(16) NOT NULL DEFAULT 'user',
            api_token VARCHAR(255) NULL UNIQUE,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_role CHECK (role IN ('user', 'admin'))
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create reservations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            court_id UUID NOT NULL REFERENCES courts(id),
            user_id UUID NOT NULL REFERENCES users(id),
            start_datetime TIMESTAMP NOT NULL,
            end_datetime TIMESTAMP NOT NULL,
            status VARCHAR(16) NOT NULL DEFAULT 'pending',
            total_price NUMERIC(10, 2) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_reservation_window CHECK (end_datetime > start_datetime),
            CONSTRAINT valid_status CHECK (status IN ('pending', 'confirmed', 'cancelled')),
            CONSTRAINT non_negative_total CHECK (total_price >= 0)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create blackout_periods table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS blackout_periods (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            court_id UUID NOT NULL REFERENCES courts(id),
            start_datetime TIMESTAMP NOT NULL,
            end_datetime TIMESTAMP NOT NULL,
            reason VARCHAR(255) NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_blackout_window CHECK (end_datetime > start_datetime)
        );
        "#,
    )
    .execute(pool)
    .await?;

    for statement in INDEXES {
        sqlx::query(statement).execute(pool).await?;
    }

    info!("Database schema initialized successfully.");
    Ok(())
}
