//! Idempotent `users` table bootstrap.

use super::DbResult;
use log::{error, info};
use sqlx::PgPool;
use std::time::Instant;

pub const USERS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100),
    email VARCHAR(100)
)";

/// Creates the `users` table when it does not exist yet.
///
/// Safe to call on every startup.
///
/// # Side effects
/// - Emits `schema_init` logging events with duration and status.
pub async fn ensure_schema(pool: &PgPool) -> DbResult<()> {
    let started_at = Instant::now();
    info!("event=schema_init module=db status=start table=users");

    match sqlx::query(USERS_TABLE_SQL).execute(pool).await {
        Ok(_) => {
            info!(
                "event=schema_init module=db status=ok table=users duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            error!(
                "event=schema_init module=db status=error table=users duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err.into())
        }
    }
}
