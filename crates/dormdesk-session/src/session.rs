//! Session types: the client's current authentication state.
//!
//! A session is either anonymous or fully populated. There is no way to
//! build one with a token but no role, or a role but no subject id: the
//! three values live together in [`Credentials`], and a [`Session`] holds
//! either all of them or none.

use dormdesk_protocol::Role;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// The three values a login produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Opaque bearer token. Never inspected locally; it is valid until the
    /// backend says otherwise.
    pub token: String,

    /// Which view subtree this user may enter.
    pub role: Role,

    /// Student number or admin id, as the backend reported it.
    pub subject_id: String,
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The client's authentication state.
///
/// `Default` is the anonymous session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    credentials: Option<Credentials>,
}

impl Session {
    /// The anonymous session (nobody logged in).
    pub fn anonymous() -> Self {
        Self { credentials: None }
    }

    /// A fully populated session.
    pub fn authenticated(
        token: impl Into<String>,
        role: Role,
        subject_id: impl Into<String>,
    ) -> Self {
        Self {
            credentials: Some(Credentials {
                token: token.into(),
                role,
                subject_id: subject_id.into(),
            }),
        }
    }

    /// Returns `true` if nobody is logged in.
    pub fn is_anonymous(&self) -> bool {
        self.credentials.is_none()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn role(&self) -> Option<Role> {
        self.credentials.as_ref().map(|c| c.role)
    }

    pub fn subject_id(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.subject_id.as_str())
    }
}
