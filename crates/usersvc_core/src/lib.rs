//! Core domain logic for the users service.
//! This crate owns the user model, the repository contract and both store
//! implementations; the HTTP layer only maps these onto routes.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{connect_pool, ensure_schema, DbError, DbResult, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogDestination, LoggingError};
pub use model::user::{User, UserId, UserKey, UserPayload};
pub use repo::pg_repo::PgUserRepository;
pub use repo::sample_repo::{sample_users, SampleUserRepository};
pub use repo::user_repo::{RepoError, RepoResult, UserRepository};
pub use service::user_service::UserService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
