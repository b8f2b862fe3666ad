//! The navigation guard.
//!
//! One pure function, [`decide`], called before every view transition.
//! It has no state of its own: the answer depends only on the target's
//! access declaration and the current session.
//!
//! ## Why a free function and not a method on `Router`?
//!
//! `decide` takes two shared borrows (`&RouteDescriptor`, `&Session`) and
//! returns an owned [`Decision`]. Nothing is mutated, so the same inputs
//! always give the same answer. That makes every rule testable with a
//! plain `#[test]`: no router, no table, no async runtime.
//!
//! The [`Router`](crate::Router) is the only caller that acts on the
//! answer. It follows a `Redirect` by calling `decide` again on the new
//! target, which is how "anonymous → `/login`" and "wrong role → own
//! home" chain into a single navigation.
//!
//! ## Reading the match
//!
//! The outer `match` is on what the target declares; the inner one is on
//! who is asking. `session.role()` returns `Option<Role>`, so `None` is
//! the anonymous case and `Some(role)` is any logged-in user. Match
//! guards (`if target.is_entry_screen()`) keep the rule table flat
//! instead of nesting `if` blocks inside each arm.

use std::fmt;

use dormdesk_session::Session;

use crate::route::{LOGIN_PATH, RouteAccess, RouteDescriptor};

/// The guard's answer for one transition attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Enter the target view.
    Allow,
    /// Don't enter; go here instead.
    Redirect(String),
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allow => write!(f, "allow"),
            Self::Redirect(path) => write!(f, "redirect to {path}"),
        }
    }
}

/// Decides whether `target` may be entered with `session`.
///
/// First matching rule wins:
///
/// 1. Public target: an authenticated user asking for login/registration
///    goes to their role's home; everyone else is allowed.
/// 2. Protected target: anonymous users go to `/login`; a user of the
///    wrong role goes to their OWN home (they're logged in, just in the
///    wrong area); otherwise allowed.
/// 3. Anything else is allowed.
///
/// Never fails and never blocks without naming a redirect target.
pub fn decide(target: &RouteDescriptor, session: &Session) -> Decision {
    match target.access {
        RouteAccess::Public => match session.role() {
            Some(role) if target.is_entry_screen() => Decision::Redirect(role.home().to_string()),
            _ => Decision::Allow,
        },
        RouteAccess::RequiresAuth { role: required } => match session.role() {
            None => Decision::Redirect(LOGIN_PATH.to_string()),
            Some(actual) => match required {
                Some(required) if required != actual => {
                    Decision::Redirect(actual.home().to_string())
                }
                _ => Decision::Allow,
            },
        },
        RouteAccess::Open => Decision::Allow,
    }
}
