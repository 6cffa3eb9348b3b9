//! Database pool construction and schema initialization.
//!
//! The schema is created idempotently at startup; there is no separate
//! migration step for this application's two tables.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

const CREATE_USERS: &str = "CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const CREATE_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id UUID PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    status TEXT NOT NULL,
    user_id INTEGER NOT NULL REFERENCES users(id),
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
)";

/// Creates a PostgreSQL connection pool and verifies connectivity.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(30))
        .connect(database_url)
        .await?;

    // Cheap reachability probe before the server starts accepting requests.
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// Ensures the `users` and `tasks` tables exist.
pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_USERS).execute(pool).await?;
    sqlx::query(CREATE_TASKS).execute(pool).await?;
    log::info!("database schema is in sync");
    Ok(())
}
