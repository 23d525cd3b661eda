//! PostgreSQL-backed user repository.
//!
//! # Responsibility
//! - Map each repository operation to exactly one SQL statement.
//! - Keep SQL text inside the persistence boundary.
//!
//! # Invariants
//! - Path keys are bound as text and cast by the server, so malformed ids
//!   fail with the store's own error message.
//! - `id` is read back as `BIGINT` regardless of the `SERIAL` column width.

use super::user_repo::{RepoError, RepoResult, UserRepository};
use crate::model::user::{User, UserKey, UserPayload};
use async_trait::async_trait;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id::BIGINT AS id, name, email";

/// Repository over the `users` table.
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list_users(&self) -> RepoResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    async fn get_user(&self, key: &UserKey) -> RepoResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = CAST($1 AS INTEGER)"
        ))
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_user(&self, payload: &UserPayload) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {USER_COLUMNS}"
        ))
        .bind(payload.name.as_deref())
        .bind(payload.email.as_deref())
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_user(&self, key: &UserKey, payload: &UserPayload) -> RepoResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            "UPDATE users
             SET name = $1, email = $2
             WHERE id = CAST($3 AS INTEGER)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(payload.name.as_deref())
        .bind(payload.email.as_deref())
        .bind(key.as_str())
        .fetch_optional(&self.pool)
        .await?;

        user.ok_or_else(|| RepoError::NotFound(key.clone()))
    }

    async fn delete_user(&self, key: &UserKey) -> RepoResult<()> {
        let removed = sqlx::query("DELETE FROM users WHERE id = CAST($1 AS INTEGER)")
            .bind(key.as_str())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if removed == 0 {
            return Err(RepoError::NotFound(key.clone()));
        }

        Ok(())
    }
}
