//! Identity and request payloads for the auth endpoints. Request types carry
//! passwords, so they are never logged and never persisted.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use std::{fmt, str::FromStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Student,
    Tutor,
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Student, Role::Tutor, Role::Admin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Student => "STUDENT",
            Role::Tutor => "TUTOR",
            Role::Admin => "ADMIN",
        }
    }

    /// Roles a user may pick for themselves at signup.
    #[must_use]
    pub const fn is_self_assignable(self) -> bool {
        matches!(self, Role::Student | Role::Tutor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "STUDENT" => Ok(Role::Student),
            "TUTOR" => Ok(Role::Tutor),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// Backend-assigned user id; the backend emits numbers, older payloads strings.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(id) => write!(f, "{id}"),
            UserId::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        UserId::Number(id)
    }
}

impl From<&str> for UserId {
    fn from(id: &str) -> Self {
        UserId::Text(id.to_string())
    }
}

/// The authenticated user held client-side. Every field is required, so a
/// partial record never deserializes; unknown fields (tokens, preferences)
/// are dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Identity {
    /// First character of the display name, used for the sidebar avatar.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name.trim().chars().next()
    }
}

#[derive(Serialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
    pub role: Role,
}

#[derive(Serialize)]
pub struct SigninRequest {
    pub email: String,
    #[serde(serialize_with = "expose")]
    pub password: SecretString,
}

fn expose<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

/// Whatever the signup endpoint returned; the backend answers `{message}`.
#[derive(Clone, Debug, PartialEq)]
pub struct CreatedAccount {
    pub message: Option<String>,
    pub body: serde_json::Value,
}

impl From<serde_json::Value> for CreatedAccount {
    fn from(body: serde_json::Value) -> Self {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(str::to_string);
        Self { message, body }
    }
}
