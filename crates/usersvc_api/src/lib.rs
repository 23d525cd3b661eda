//! HTTP surface for the users service.
//!
//! # Responsibility
//! - Expose the users CRUD routes and the version probes over JSON.
//! - Keep status-code semantics in one place (`error`).
//!
//! # See also
//! - `usersvc_core` for the repository and service contracts.

pub mod api;
pub mod error;
pub mod router;

pub use api::{VersionInfo, VERSION_100_INFO, VERSION_INFO};
pub use error::{ApiError, ApiResult, ErrorBody, MessageBody, USER_NOT_FOUND_MESSAGE};
pub use router::{build_router, serve, AppState, IdPolicy};
