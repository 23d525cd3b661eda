//! Connection pool bootstrap for PostgreSQL.
//!
//! # Responsibility
//! - Translate `StoreConfig` into pool options.
//! - Emit `db_open` events without leaking credentials.
//!
//! # Invariants
//! - The pool connects lazily; an unreachable store surfaces per request,
//!   never at construction time.

use super::StoreConfig;
use log::info;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Instant;

/// Builds a lazily-connecting pool for the configured store.
///
/// Must be called from within a tokio runtime.
///
/// # Side effects
/// - Emits `db_open` logging events with target and duration.
pub fn connect_pool(config: &StoreConfig) -> PgPool {
    let started_at = Instant::now();
    info!(
        "event=db_open module=db status=start mode=lazy host={} port={} database={} max_connections={}",
        config.host, config.port, config.database, config.max_connections
    );

    let options = PgConnectOptions::new()
        .host(&config.host)
        .port(config.port)
        .database(&config.database)
        .username(&config.user)
        .password(&config.password);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(options);

    info!(
        "event=db_open module=db status=ok mode=lazy duration_ms={}",
        started_at.elapsed().as_millis()
    );
    pool
}
