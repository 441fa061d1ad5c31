// src/config/db.rs
// DOCUMENTATION: Database connection pool and schema initialization
// PURPOSE: Setup and manage PostgreSQL connection pool

use crate::config::Config;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Initialize PostgreSQL connection pool
/// DOCUMENTATION: Creates connection pool with optimal settings
/// Called once during application startup in main.rs
/// Returns pool that is used for all database operations
pub async fn init_db_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    log::info!("Initializing database pool: {}", config.database_url);

    let pool = PgPoolOptions::new()
        // Maximum concurrent connections
        .max_connections(config.db_max_connections)
        // Timeout waiting for connection from pool
        .acquire_timeout(Duration::from_secs(config.db_connection_timeout))
        // Connection idle timeout (5 minutes)
        .idle_timeout(Duration::from_secs(300))
        // Connection lifetime (30 minutes before recycle)
        .max_lifetime(Duration::from_secs(1800))
        .connect(&config.database_url)
        .await?;

    // Verify connection works
    sqlx::query("SELECT 1").execute(&pool).await?;

    log::info!("Database pool initialized successfully");
    Ok(pool)
}

/// Create tables and indexes if they do not exist yet
/// DOCUMENTATION: Idempotent, runs at every startup. Photo rows reference
/// their venue with ON DELETE CASCADE so a venue delete cannot leave
/// orphaned records.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            owner_id TEXT NOT NULL,
            name TEXT NOT NULL DEFAULT '',
            guest_count INTEGER NOT NULL DEFAULT 0,
            event_duration_hours DOUBLE PRECISION NOT NULL DEFAULT 0,
            venue_rental_cost DOUBLE PRECISION NOT NULL DEFAULT 0,
            catering_per_person DOUBLE PRECISION NOT NULL DEFAULT 0,
            catering_flat_fee DOUBLE PRECISION NOT NULL DEFAULT 0,
            bar_service_rate DOUBLE PRECISION NOT NULL DEFAULT 0,
            bar_flat_fee DOUBLE PRECISION NOT NULL DEFAULT 0,
            coordinator_fee DOUBLE PRECISION NOT NULL DEFAULT 0,
            event_insurance DOUBLE PRECISION NOT NULL DEFAULT 0,
            other_costs DOUBLE PRECISION NOT NULL DEFAULT 0,
            notes TEXT NOT NULL DEFAULT '',
            title_photo TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venue_photos (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            venue_id UUID NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            file_path TEXT NOT NULL,
            caption TEXT NOT NULL DEFAULT '',
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_venues_owner ON venues (owner_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_venue_photos_venue ON venue_photos (venue_id)")
        .execute(pool)
        .await?;

    log::info!("Database schema ready");
    Ok(())
}
