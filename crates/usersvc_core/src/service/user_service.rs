//! User use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for the HTTP layer.
//! - Delegate persistence to the injected repository implementation.
//!
//! # Invariants
//! - Every call maps to exactly one repository operation.
//! - Service layer remains storage-agnostic.
//! - Diagnostics carry ids and outcomes only, never `name`/`email` values.

use crate::model::user::{User, UserKey, UserPayload};
use crate::repo::user_repo::{RepoError, RepoResult, UserRepository};
use log::{debug, error};
use std::sync::Arc;

/// Use-case service wrapper for user CRUD operations.
///
/// Cheap to clone; clones share the same repository.
#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Label of the backing store (`postgres` or `sample`).
    pub fn backend(&self) -> &'static str {
        self.repo.backend()
    }

    pub async fn list_users(&self) -> RepoResult<Vec<User>> {
        let result = self.repo.list_users().await;
        if let Ok(users) = &result {
            debug!(
                "event=user_list module=service status=ok count={}",
                users.len()
            );
        }
        self.observe("user_list", result)
    }

    pub async fn get_user(&self, key: &UserKey) -> RepoResult<Option<User>> {
        let result = self.repo.get_user(key).await;
        if let Ok(found) = &result {
            debug!(
                "event=user_get module=service status=ok id={} found={}",
                key,
                found.is_some()
            );
        }
        self.observe("user_get", result)
    }

    pub async fn create_user(&self, payload: &UserPayload) -> RepoResult<User> {
        let result = self.repo.create_user(payload).await;
        if let Ok(user) = &result {
            debug!("event=user_create module=service status=ok id={}", user.id);
        }
        self.observe("user_create", result)
    }

    /// Overwrites an existing user.
    ///
    /// Returns repository-level not-found errors unchanged.
    pub async fn update_user(&self, key: &UserKey, payload: &UserPayload) -> RepoResult<User> {
        let result = self.repo.update_user(key, payload).await;
        if result.is_ok() {
            debug!("event=user_update module=service status=ok id={key}");
        }
        self.observe("user_update", result)
    }

    pub async fn delete_user(&self, key: &UserKey) -> RepoResult<()> {
        let result = self.repo.delete_user(key).await;
        if result.is_ok() {
            debug!("event=user_delete module=service status=ok id={key}");
        }
        self.observe("user_delete", result)
    }

    fn observe<T>(&self, event: &str, result: RepoResult<T>) -> RepoResult<T> {
        match &result {
            Err(RepoError::NotFound(key)) => {
                debug!("event={event} module=service status=not_found id={key}");
            }
            Err(RepoError::Db(err)) => {
                error!(
                    "event={event} module=service status=error backend={} error={}",
                    self.repo.backend(),
                    err
                );
            }
            Ok(_) => {}
        }
        result
    }
}
