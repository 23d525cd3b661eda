//! Read-only sample repository used in mock mode.
//!
//! # Responsibility
//! - Answer every repository call from a fixed two-row sample set.
//! - Fabricate ids for creates without persisting anything.
//!
//! # Invariants
//! - The sample set is never mutated; writes only echo their result.
//! - Keys that are not plain integers match no sample row.

use super::user_repo::{RepoError, RepoResult, UserRepository};
use crate::model::user::{User, UserId, UserKey, UserPayload};
use async_trait::async_trait;
use std::time::{SystemTime, UNIX_EPOCH};

/// In-memory stand-in for the relational store.
#[derive(Debug, Clone)]
pub struct SampleUserRepository {
    users: Vec<User>,
}

impl SampleUserRepository {
    pub fn new() -> Self {
        Self {
            users: sample_users(),
        }
    }

    fn find(&self, key: &UserKey) -> Option<&User> {
        let id = key.as_id()?;
        self.users.iter().find(|user| user.id == id)
    }
}

impl Default for SampleUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixed sample rows served in mock mode.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(1, "John Doe", "john@example.com"),
        User::new(2, "Jane Smith", "jane@example.com"),
    ]
}

#[async_trait]
impl UserRepository for SampleUserRepository {
    fn backend(&self) -> &'static str {
        "sample"
    }

    async fn list_users(&self) -> RepoResult<Vec<User>> {
        Ok(self.users.clone())
    }

    async fn get_user(&self, key: &UserKey) -> RepoResult<Option<User>> {
        Ok(self.find(key).cloned())
    }

    async fn create_user(&self, payload: &UserPayload) -> RepoResult<User> {
        Ok(User::from_payload(fabricated_id(), payload))
    }

    async fn update_user(&self, key: &UserKey, payload: &UserPayload) -> RepoResult<User> {
        let existing = self
            .find(key)
            .ok_or_else(|| RepoError::NotFound(key.clone()))?;
        Ok(User::from_payload(existing.id, payload))
    }

    async fn delete_user(&self, key: &UserKey) -> RepoResult<()> {
        self.find(key)
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(key.clone()))
    }
}

fn fabricated_id() -> UserId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            UserId::try_from(elapsed.as_millis()).unwrap_or(UserId::MAX)
        })
}
