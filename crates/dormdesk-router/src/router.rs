//! The router: tracks where the user is and moves them, guard permitting.
//!
//! Every transition goes through [`Router::navigate`]:
//!
//! ```text
//! target ──→ table.resolve ──Redirect──→ (hop) ──┐
//!              │                                  │
//!              └─Route──→ guard::decide ──Redirect─┘
//!                              │
//!                            Allow ──→ commit `current`
//! ```
//!
//! # Concurrency note
//!
//! `Router` is NOT thread-safe by itself. The client keeps it behind a
//! mutex next to the session store.

use dormdesk_session::Session;

use crate::guard::{self, Decision};
use crate::table::{self, Resolved, RouteTable};
use crate::RouterError;

/// How many redirects a single navigation may follow before giving up.
pub const DEFAULT_MAX_REDIRECTS: usize = 8;

/// Where a successful navigation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The committed location.
    pub path: String,
    /// `true` if it's not the path that was asked for.
    pub redirected: bool,
}

/// Owns the route table and the current location.
pub struct Router {
    table: RouteTable,
    current: Option<String>,
    max_redirects: usize,
}

impl Router {
    pub fn new(table: RouteTable) -> Self {
        Self {
            table,
            current: None,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Sets the redirect limit for each navigation.
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Navigates to `target` as seen by `session`.
    ///
    /// Static redirects and guard redirects are followed until the guard
    /// allows a path, which becomes [`current`](Self::current).
    ///
    /// # Errors
    /// Returns [`RouterError::RedirectLoop`] when more than the configured
    /// number of redirects would be needed. `current` is left unchanged.
    pub fn navigate(&mut self, target: &str, session: &Session) -> Result<Navigation, RouterError> {
        let requested = table::normalize(target);
        let mut path = requested.clone();
        let mut hops = 0;

        loop {
            let next = match self.table.resolve(&path) {
                Resolved::Redirect(to) => to,
                Resolved::Route(route) => match guard::decide(&route, session) {
                    Decision::Allow => break,
                    Decision::Redirect(to) => {
                        tracing::debug!(from = %path, %to, access = %route.access, "guard redirect");
                        to
                    }
                },
            };

            hops += 1;
            if hops > self.max_redirects {
                tracing::warn!(path = %requested, hops, "giving up on redirect loop");
                return Err(RouterError::RedirectLoop {
                    path: requested,
                    hops,
                });
            }
            path = table::normalize(&next);
        }

        let redirected = path != requested;
        tracing::info!(%path, redirected, "navigated");
        self.current = Some(path.clone());
        Ok(Navigation { path, redirected })
    }

    /// The committed location, or `None` before the first navigation.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn max_redirects(&self) -> usize {
        self.max_redirects
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new(RouteTable::standard())
    }
}
