//! Router assembly, shared state and server loop.
//!
//! # Responsibility
//! - Bind routes to handlers and inject the user service.
//! - Apply the configured identifier policy.
//! - Emit one `http_request` event per request.

use crate::api;
use crate::error::{ApiError, ApiResult};
use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use log::info;
use std::future::Future;
use std::time::Instant;
use tokio::net::TcpListener;
use usersvc_core::{UserKey, UserService};

/// How raw `:id` path segments are admitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Pass any segment to the store unchanged.
    #[default]
    Permissive,
    /// Reject segments that are not plain integers with 400.
    Strict,
}

impl IdPolicy {
    pub fn from_strict_flag(strict: bool) -> Self {
        if strict {
            Self::Strict
        } else {
            Self::Permissive
        }
    }

    pub fn resolve(self, raw: String) -> ApiResult<UserKey> {
        let key = UserKey::new(raw);
        if self == Self::Strict && key.as_id().is_none() {
            return Err(ApiError::BadRequest(format!("invalid user id `{key}`")));
        }
        Ok(key)
    }
}

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    service: UserService,
    id_policy: IdPolicy,
}

impl AppState {
    pub fn new(service: UserService, id_policy: IdPolicy) -> Self {
        Self { service, id_policy }
    }

    pub fn service(&self) -> &UserService {
        &self.service
    }

    pub fn id_policy(&self) -> IdPolicy {
        self.id_policy
    }
}

/// Builds the full route table.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/users", get(api::list_users).post(api::create_user))
        .route(
            "/api/users/:id",
            get(api::get_user)
                .put(api::update_user)
                .delete(api::delete_user),
        )
        .route("/api/version", get(api::version))
        .route("/api/version100", get(api::version100))
        .layer(middleware::from_fn(log_requests))
        .with_state(state)
}

/// Serves `router` on `listener` until `shutdown` resolves.
///
/// In-flight requests are allowed to finish after `shutdown` fires.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let local_addr = listener.local_addr()?;
    info!("event=server_listen module=api status=ok addr=http://{local_addr}");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("event=server_shutdown module=api status=ok addr=http://{local_addr}");
    Ok(())
}

async fn log_requests(request: Request, next: Next) -> Response {
    let started_at = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();

    let response = next.run(request).await;

    info!(
        "event=http_request module=api status={} method={} path={} duration_ms={}",
        response.status().as_u16(),
        method,
        path,
        started_at.elapsed().as_millis()
    );
    response
}
