//! HTTP error mapping.
//!
//! # Responsibility
//! - Translate repository and boundary failures into status codes and JSON
//!   bodies.
//!
//! # Invariants
//! - Not-found responses use a `message` member; every other failure uses
//!   an `error` member.
//! - Store failures surface the raw driver message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use usersvc_core::RepoError;

pub type ApiResult<T> = Result<T, ApiError>;

pub const USER_NOT_FOUND_MESSAGE: &str = "User not found";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User not found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Store(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(_) => Self::NotFound,
            RepoError::Db(err) => Self::Store(err.message()),
        }
    }
}

/// Body of a 404 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Body of a 400/500 response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::NotFound => (
                status,
                Json(MessageBody {
                    message: USER_NOT_FOUND_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            Self::BadRequest(error) => {
                warn!("event=request_rejected module=api status=bad_request error={error}");
                (status, Json(ErrorBody { error })).into_response()
            }
            Self::Store(error) => (status, Json(ErrorBody { error })).into_response(),
        }
    }
}
