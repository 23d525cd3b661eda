//! User domain model.
//!
//! # Responsibility
//! - Define the canonical `users` record returned by every read/write path.
//! - Define the request payload accepted by create/update entry points.
//! - Carry raw path identifiers until a store decides how to interpret them.
//!
//! # Invariants
//! - `id` is assigned by the store and never changes after creation.
//! - `name` and `email` are free-form; absence is stored as `NULL`.

use serde::de::{Error as _, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// Store-assigned user identifier.
pub type UserId = i64;

/// Canonical user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: UserId,
    pub name: Option<String>,
    pub email: Option<String>,
}

impl User {
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Builds the record a write with `payload` produces for `id`.
    pub fn from_payload(id: UserId, payload: &UserPayload) -> Self {
        Self {
            id,
            name: payload.name.clone(),
            email: payload.email.clone(),
        }
    }
}

/// Body accepted by create and update.
///
/// Both fields are optional; missing values overwrite with `NULL`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserPayload {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl UserPayload {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
        }
    }

    /// Parses a raw request body.
    ///
    /// An empty (or whitespace-only) body is treated as `{}`.
    ///
    /// # Errors
    /// - Returns the JSON error when the body is not an object with
    ///   string/null `name` and `email` members. Arrays are rejected, never
    ///   mapped onto fields by position.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        match serde_json::from_slice::<Value>(body)? {
            object @ Value::Object(_) => serde_json::from_value(object),
            other => Err(serde_json::Error::invalid_type(
                unexpected_kind(&other),
                &"a JSON object",
            )),
        }
    }
}

fn unexpected_kind(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(flag) => Unexpected::Bool(*flag),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(text) => Unexpected::Str(text),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}

/// Raw user identifier as received on the request path.
///
/// The text is not validated here: the Postgres store casts it server-side,
/// and the sample store compares it numerically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserKey(String);

impl UserKey {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric interpretation of the key, if it is a plain integer.
    pub fn as_id(&self) -> Option<UserId> {
        self.0.parse().ok()
    }
}

impl From<UserId> for UserKey {
    fn from(value: UserId) -> Self {
        Self(value.to_string())
    }
}

impl Display for UserKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
