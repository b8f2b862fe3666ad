//! Route metadata: what a view declares about who may enter it.

use std::fmt;

use dormdesk_protocol::Role;

/// The entry screen. Anonymous users are sent here.
pub const LOGIN_PATH: &str = "/login";
/// The self-registration screen.
pub const REGISTER_PATH: &str = "/register";

// ---------------------------------------------------------------------------
// RouteAccess
// ---------------------------------------------------------------------------

/// Who may enter a route.
///
/// A route is public, protected, or neither. Encoding that as one enum
/// rules out the "both public and requires-auth" combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Anyone may enter (login, registration).
    Public,

    /// Only an authenticated session may enter; if `role` is set, only
    /// that role.
    RequiresAuth { role: Option<Role> },

    /// No declaration at all. Freely enterable.
    Open,
}

impl fmt::Display for RouteAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Public => write!(f, "public"),
            Self::RequiresAuth { role: Some(role) } => write!(f, "requires-auth({role})"),
            Self::RequiresAuth { role: None } => write!(f, "requires-auth"),
            Self::Open => write!(f, "open"),
        }
    }
}

// ---------------------------------------------------------------------------
// RouteDescriptor
// ---------------------------------------------------------------------------

/// A navigable path plus its access declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: String,
    pub access: RouteAccess,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, access: RouteAccess) -> Self {
        Self {
            path: path.into(),
            access,
        }
    }

    pub fn public(path: impl Into<String>) -> Self {
        Self::new(path, RouteAccess::Public)
    }

    pub fn open(path: impl Into<String>) -> Self {
        Self::new(path, RouteAccess::Open)
    }

    /// Requires authentication and, if given, a specific role.
    pub fn protected(path: impl Into<String>, role: Option<Role>) -> Self {
        Self::new(path, RouteAccess::RequiresAuth { role })
    }

    pub fn is_public(&self) -> bool {
        matches!(self.access, RouteAccess::Public)
    }

    pub fn requires_auth(&self) -> bool {
        matches!(self.access, RouteAccess::RequiresAuth { .. })
    }

    pub fn required_role(&self) -> Option<Role> {
        match self.access {
            RouteAccess::RequiresAuth { role } => role,
            _ => None,
        }
    }

    /// Returns `true` for the login and registration screens.
    pub fn is_entry_screen(&self) -> bool {
        self.path == LOGIN_PATH || self.path == REGISTER_PATH
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_for_public_route() {
        let route = RouteDescriptor::public(LOGIN_PATH);
        assert!(route.is_public());
        assert!(!route.requires_auth());
        assert_eq!(route.required_role(), None);
        assert!(route.is_entry_screen());
    }

    #[test]
    fn test_flags_for_protected_route() {
        let route = RouteDescriptor::protected("/admin/bills", Some(Role::Admin));
        assert!(!route.is_public());
        assert!(route.requires_auth());
        assert_eq!(route.required_role(), Some(Role::Admin));
        assert!(!route.is_entry_screen());
    }

    #[test]
    fn test_flags_for_open_route() {
        let route = RouteDescriptor::open("/about");
        assert!(!route.is_public());
        assert!(!route.requires_auth());
    }

    #[test]
    fn test_access_display() {
        assert_eq!(RouteAccess::Public.to_string(), "public");
        assert_eq!(
            RouteAccess::RequiresAuth {
                role: Some(Role::Student)
            }
            .to_string(),
            "requires-auth(student)"
        );
        assert_eq!(RouteAccess::Open.to_string(), "open");
    }
}
