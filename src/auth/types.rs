//! Types for authentication

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The signed-in user as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user ID
    #[serde(alias = "_id", default)]
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Email address
    #[serde(default)]
    pub email: String,

    /// Role, `admin` or `user`
    #[serde(default)]
    pub role: String,
}

impl User {
    /// Whether the backend granted the admin role
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Pull the user out of an auth response payload.
///
/// The backend answers either with the user itself or with `{ user: {...} }`;
/// `null`, an empty object, or a missing user mean nobody is signed in.
pub(crate) fn user_from_payload(payload: Value) -> Option<User> {
    let value = match payload {
        Value::Object(mut map) if map.contains_key("user") => map.remove("user")?,
        other => other,
    };
    if !value.is_object() {
        return None;
    }
    let user: User = serde_json::from_value(value).ok()?;
    if user.id.is_empty() && user.email.is_empty() {
        None
    } else {
        Some(user)
    }
}

/// Credentials for email/password login
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// Payload for registering a new account
#[derive(Debug, Clone, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}
