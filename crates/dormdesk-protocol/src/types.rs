//! Core protocol types shared by every layer.
//!
//! These are the values that cross the boundary between the client and
//! the backend: the role tag, the login token response, and the error
//! body the backend returns on failure.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The coarse access class of an authenticated user.
///
/// Serialized as `"student"` / `"admin"`, the same strings the backend
/// puts in `user_type` and the session store persists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Admin,
}

impl Role {
    /// The wire/storage form of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Admin => "admin",
        }
    }

    /// The root of the view subtree this role may enter.
    ///
    /// Authenticated users who land somewhere they shouldn't are sent here.
    pub fn home(self) -> &'static str {
        match self {
            Self::Student => "/student",
            Self::Admin => "/admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "admin" => Ok(Self::Admin),
            other => Err(ProtocolError::InvalidMessage(format!(
                "unknown role '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Auth payloads
// ---------------------------------------------------------------------------

/// Successful response of `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Opaque bearer credential.
    pub access_token: String,
    /// Always `"bearer"` today.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Which role the credential belongs to.
    pub user_type: Role,
    /// Student number for students, numeric admin id (as a string) for admins.
    pub user_id: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Response of `GET /auth/me`, tagged by `user_type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "user_type", rename_all = "lowercase")]
pub enum CurrentUser {
    Student {
        student_id: String,
        name: String,
        email: String,
        college: String,
        dorm_id: Option<i64>,
    },
    Admin {
        admin_id: i64,
        username: String,
        name: String,
        email: String,
        role: String,
    },
}

impl CurrentUser {
    /// The role this user authenticated as.
    pub fn role(&self) -> Role {
        match self {
            Self::Student { .. } => Role::Student,
            Self::Admin { .. } => Role::Admin,
        }
    }
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default)]
    pub detail: Option<String>,
}

// ---------------------------------------------------------------------------
// ErrorBody
// ---------------------------------------------------------------------------

/// The body the backend sends with a non-2xx status.
///
/// Everything is optional: a proxy error page or an empty body still
/// parses (via [`ErrorBody::from_bytes`]) into an `ErrorBody` with no detail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Either a human-readable string or, for validation failures, a list
    /// of `{ "loc": [...], "msg": "...", "type": "..." }` entries.
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parses an error body, treating anything that isn't a JSON object
    /// with a `detail` field as "no detail".
    pub fn from_bytes(data: &[u8]) -> Self {
        serde_json::from_slice(data).unwrap_or_default()
    }

    /// The message to show the user, if the backend provided one.
    ///
    /// A string `detail` is returned verbatim. A list of validation entries
    /// is flattened to their `msg` fields joined with `"; "`. Anything else
    /// (numbers, empty strings, lists without messages) counts as absent.
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
            serde_json::Value::Array(entries) => {
                let msgs: Vec<&str> = entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(serde_json::Value::as_str))
                    .collect();
                if msgs.is_empty() {
                    None
                } else {
                    Some(msgs.join("; "))
                }
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// A paginated listing as returned by the admin endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: u64,
    pub items: Vec<T>,
    pub skip: u64,
    pub limit: u64,
}

/// Offset/limit pair sent as query parameters on paginated endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { skip: 0, limit: 50 }
    }
}
