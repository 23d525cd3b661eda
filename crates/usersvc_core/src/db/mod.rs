//! PostgreSQL store bootstrap and schema entry points.
//!
//! # Responsibility
//! - Build the connection pool from explicit store configuration.
//! - Create the `users` table idempotently before serving requests.
//!
//! # Invariants
//! - No module-level pool handle exists; callers own the `PgPool` value.
//! - Schema bootstrap is `CREATE TABLE IF NOT EXISTS` only; there is no
//!   versioned migration history.

use std::time::Duration;
use thiserror::Error;

mod open;
pub mod schema;

pub use open::connect_pool;
pub use schema::ensure_schema;

pub type DbResult<T> = Result<T, DbError>;

const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl DbError {
    /// Driver message suitable for surfacing to API callers.
    ///
    /// Server-side errors report the database's own message text; other
    /// failures (connect, pool timeout, decode) use the driver description.
    pub fn message(&self) -> String {
        match self {
            Self::Sqlx(sqlx::Error::Database(err)) => err.message().to_string(),
            Self::Sqlx(err) => err.to_string(),
        }
    }
}

/// Connection settings for the relational store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 5432,
            database: "mydb".to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            max_connections: 10,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}
