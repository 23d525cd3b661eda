//! Route handlers for the users resource and version probes.
//!
//! # Responsibility
//! - Extract path keys and request bodies at the HTTP boundary.
//! - Call exactly one service operation per request.
//! - Shape success responses (status + JSON body).
//!
//! # Invariants
//! - Handlers hold no state beyond the shared `AppState`.
//! - Bodies are parsed leniently: missing fields become `null`, unknown
//!   fields are ignored.

use crate::error::{ApiError, ApiResult};
use crate::router::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use usersvc_core::{User, UserPayload};

/// Static version probe payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub message: &'static str,
}

pub const VERSION_INFO: VersionInfo = VersionInfo {
    version: "2.0",
    message: "Updated API!",
};

pub const VERSION_100_INFO: VersionInfo = VersionInfo {
    version: "2.00000",
    message: "Updated API0000000!",
};

/// `GET /api/users`
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let users = state.service().list_users().await?;
    Ok(Json(users))
}

/// `GET /api/users/:id`
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    let key = state.id_policy().resolve(id)?;
    state
        .service()
        .get_user(&key)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// `POST /api/users`
pub async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<User>)> {
    let payload = parse_payload(&body)?;
    let user = state.service().create_user(&payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT /api/users/:id`
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> ApiResult<Json<User>> {
    let payload = parse_payload(&body)?;
    let key = state.id_policy().resolve(id)?;
    let user = state.service().update_user(&key, &payload).await?;
    Ok(Json(user))
}

/// `DELETE /api/users/:id`
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let key = state.id_policy().resolve(id)?;
    state.service().delete_user(&key).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/version`
pub async fn version() -> Json<VersionInfo> {
    Json(VERSION_INFO)
}

/// `GET /api/version100`
pub async fn version100() -> Json<VersionInfo> {
    Json(VERSION_100_INFO)
}

fn parse_payload(body: &[u8]) -> ApiResult<UserPayload> {
    UserPayload::from_body(body)
        .map_err(|err| ApiError::BadRequest(format!("invalid JSON body: {err}")))
}
