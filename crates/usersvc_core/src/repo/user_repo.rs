//! User repository contract.
//!
//! # Responsibility
//! - Provide one CRUD surface shared by every store implementation.
//! - Translate "nothing matched" into semantic `NotFound` errors.
//!
//! # Invariants
//! - Each operation issues at most one store statement.
//! - Implementations never retry; driver failures surface as `RepoError::Db`.

use crate::db::DbError;
use crate::model::user::{User, UserKey, UserPayload};
use async_trait::async_trait;
use thiserror::Error;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for user persistence and query operations.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("user not found: {0}")]
    NotFound(UserKey),
    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for RepoError {
    fn from(value: sqlx::Error) -> Self {
        Self::Db(DbError::Sqlx(value))
    }
}

/// Repository interface for user CRUD operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Short backend label used in diagnostics.
    fn backend(&self) -> &'static str;

    /// All users ordered by ascending id.
    async fn list_users(&self) -> RepoResult<Vec<User>>;

    async fn get_user(&self, key: &UserKey) -> RepoResult<Option<User>>;

    /// Persists a new user and returns it with its assigned id.
    async fn create_user(&self, payload: &UserPayload) -> RepoResult<User>;

    /// Overwrites `name` and `email`; `id` is preserved.
    async fn update_user(&self, key: &UserKey, payload: &UserPayload) -> RepoResult<User>;

    async fn delete_user(&self, key: &UserKey) -> RepoResult<()>;
}
