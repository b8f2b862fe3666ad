//! The static route table.
//!
//! Built once at startup and never mutated afterwards. Each entry pairs a
//! [`RouteDescriptor`] with an optional static redirect: a path like
//! `/student` that only exists to forward somewhere concrete.

use std::collections::BTreeMap;

use dormdesk_protocol::Role;

use crate::route::{LOGIN_PATH, REGISTER_PATH, RouteDescriptor};

const STUDENT_VIEWS: [&str; 6] = [
    "dashboard",
    "profile",
    "dormitory",
    "bills",
    "dorm-change",
    "maintenance",
];

const ADMIN_VIEWS: [&str; 7] = [
    "dashboard",
    "students",
    "dormitories",
    "dorm-requests",
    "maintenance",
    "bills",
    "profile",
];

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    pub descriptor: RouteDescriptor,
    /// Where this path forwards before the guard ever sees it.
    pub redirect: Option<String>,
}

/// The result of looking a path up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The path forwards elsewhere unconditionally.
    Redirect(String),
    /// The path is a view; here is what it declares.
    Route(RouteDescriptor),
}

/// Maps normalized paths to their declarations.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: BTreeMap<String, RouteEntry>,
}

impl RouteTable {
    /// Creates an empty table. Every path in it resolves as open.
    pub fn new() -> Self {
        Self::default()
    }

    /// The Dormdesk client's table.
    ///
    /// ```text
    /// /                  open      → /login
    /// /login, /register  public
    /// /student           student   → /student/dashboard
    /// /student/<view>    student
    /// /admin             admin     → /admin/dashboard
    /// /admin/<view>      admin
    /// ```
    ///
    /// Child views carry the same access as their section.
    pub fn standard() -> Self {
        let mut table = Self::new()
            .with_redirect(RouteDescriptor::open("/"), LOGIN_PATH)
            .with_route(RouteDescriptor::public(LOGIN_PATH))
            .with_route(RouteDescriptor::public(REGISTER_PATH));

        for (role, views) in [
            (Role::Student, &STUDENT_VIEWS[..]),
            (Role::Admin, &ADMIN_VIEWS[..]),
        ] {
            let home = role.home();
            table = table.with_redirect(
                RouteDescriptor::protected(home, Some(role)),
                format!("{home}/dashboard"),
            );
            for view in views {
                table =
                    table.with_route(RouteDescriptor::protected(format!("{home}/{view}"), Some(role)));
            }
        }

        table
    }

    /// Adds a view. Replaces any existing entry at the same path.
    pub fn with_route(mut self, descriptor: RouteDescriptor) -> Self {
        self.insert(descriptor, None);
        self
    }

    /// Adds a path that forwards to `to` before the guard runs.
    pub fn with_redirect(mut self, descriptor: RouteDescriptor, to: impl Into<String>) -> Self {
        self.insert(descriptor, Some(to.into()));
        self
    }

    fn insert(&mut self, mut descriptor: RouteDescriptor, redirect: Option<String>) {
        descriptor.path = normalize(&descriptor.path);
        let redirect = redirect.map(|to| normalize(&to));
        self.entries.insert(
            descriptor.path.clone(),
            RouteEntry {
                descriptor,
                redirect,
            },
        );
    }

    /// Looks up `path` after normalizing it.
    ///
    /// Paths not in the table resolve to an open descriptor, so they can be
    /// entered by anyone.
    pub fn resolve(&self, path: &str) -> Resolved {
        let path = normalize(path);
        match self.entries.get(&path) {
            Some(RouteEntry {
                redirect: Some(to), ..
            }) => Resolved::Redirect(to.clone()),
            Some(entry) => Resolved::Route(entry.descriptor.clone()),
            None => {
                tracing::warn!(%path, "no route declared for path, treating as open");
                Resolved::Route(RouteDescriptor::open(path))
            }
        }
    }

    /// Returns the entry for `path`, if one is declared.
    pub fn get(&self, path: &str) -> Option<&RouteEntry> {
        self.entries.get(&normalize(path))
    }

    /// Iterates over all entries in path order.
    pub fn entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strips the query string, fragment, and trailing slash; ensures a
/// leading slash and lowercases the rest. `""` and `"/"` both become `"/"`.
///
/// Route matching is case-insensitive: `/Student/Bills` is the same view
/// as `/student/bills` and gets the same guard.
pub fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let trimmed = path.trim_end_matches('/').to_ascii_lowercase();
    if trimmed.is_empty() {
        return "/".to_string();
    }
    if trimmed.starts_with('/') {
        trimmed
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::route::RouteAccess;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("/student/"), "/student");
        assert_eq!(normalize("/student/bills?status=unpaid"), "/student/bills");
        assert_eq!(normalize("/admin#top"), "/admin");
        assert_eq!(normalize("login"), "/login");
        assert_eq!(normalize("/Student/Bills/"), "/student/bills");
    }

    #[test]
    fn test_resolve_ignores_case() {
        let table = RouteTable::standard();
        assert_eq!(
            table.resolve("/STUDENT"),
            Resolved::Redirect("/student/dashboard".into())
        );
        match table.resolve("/Admin/Students") {
            Resolved::Route(route) => assert_eq!(route.required_role(), Some(Role::Admin)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_standard_has_every_view() {
        let table = RouteTable::standard();
        // 3 top-level + 2 section redirects + 6 student + 7 admin views
        assert_eq!(table.len(), 18);

        for view in STUDENT_VIEWS {
            let entry = table.get(&format!("/student/{view}")).unwrap();
            assert_eq!(
                entry.descriptor.access,
                RouteAccess::RequiresAuth {
                    role: Some(Role::Student)
                }
            );
        }
        for view in ADMIN_VIEWS {
            let entry = table.get(&format!("/admin/{view}")).unwrap();
            assert_eq!(entry.descriptor.required_role(), Some(Role::Admin));
        }
    }

    #[test]
    fn test_standard_static_redirects() {
        let table = RouteTable::standard();
        assert_eq!(table.resolve("/"), Resolved::Redirect("/login".into()));
        assert_eq!(
            table.resolve("/student"),
            Resolved::Redirect("/student/dashboard".into())
        );
        assert_eq!(
            table.resolve("/admin/"),
            Resolved::Redirect("/admin/dashboard".into())
        );
    }

    #[test]
    fn test_entry_screens_are_public() {
        let table = RouteTable::standard();
        for path in [LOGIN_PATH, REGISTER_PATH] {
            match table.resolve(path) {
                Resolved::Route(route) => assert!(route.is_public(), "{path}"),
                other => panic!("expected a route for {path}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_resolve_unknown_path_is_open() {
        let table = RouteTable::standard();
        assert_eq!(
            table.resolve("/nowhere/?x=1"),
            Resolved::Route(RouteDescriptor::open("/nowhere"))
        );
    }

    #[test]
    fn test_resolve_strips_query() {
        let table = RouteTable::standard();
        match table.resolve("/student/bills?status=unpaid") {
            Resolved::Route(route) => assert_eq!(route.path, "/student/bills"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_with_route_replaces_existing() {
        let table = RouteTable::new()
            .with_route(RouteDescriptor::open("/x"))
            .with_route(RouteDescriptor::public("/x/"));
        assert_eq!(table.len(), 1);
        assert!(table.get("/x").unwrap().descriptor.is_public());
    }
}
