//! Integration tests for navigating the standard route table.
//!
//! Naming convention: `test_{function}_{scenario}_{expected}`.

use dormdesk_protocol::Role;
use dormdesk_router::{Decision, RouteTable, Router, RouterError, decide};
use dormdesk_session::Session;

fn student() -> Session {
    Session::authenticated("t-s", Role::Student, "123456789")
}

fn admin() -> Session {
    Session::authenticated("t1", Role::Admin, "a1")
}

// =========================================================================
// Anonymous user
// =========================================================================

#[test]
fn test_navigate_anonymous_student_bills_lands_on_login() {
    let mut router = Router::default();

    let nav = router.navigate("/student/bills", &Session::anonymous()).unwrap();

    assert_eq!(nav.path, "/login");
    assert!(nav.redirected);
    assert_eq!(router.current(), Some("/login"));
}

#[test]
fn test_navigate_anonymous_root_lands_on_login() {
    let mut router = Router::default();
    let nav = router.navigate("/", &Session::anonymous()).unwrap();
    assert_eq!(nav.path, "/login");
}

#[test]
fn test_navigate_anonymous_every_admin_view_lands_on_login() {
    let mut router = Router::default();
    for view in ["dashboard", "students", "dormitories", "dorm-requests", "maintenance", "bills", "profile"] {
        let nav = router
            .navigate(&format!("/admin/{view}"), &Session::anonymous())
            .unwrap();
        assert_eq!(nav.path, "/login", "view {view}");
    }
}

#[test]
fn test_navigate_anonymous_mixed_case_student_bills_lands_on_login() {
    let mut router = Router::default();

    for target in ["/Student/Bills", "/STUDENT", "/admin/STUDENTS/"] {
        let nav = router.navigate(target, &Session::anonymous()).unwrap();
        assert_eq!(nav.path, "/login", "target {target}");
        assert!(nav.redirected, "target {target}");
    }
    assert_eq!(router.current(), Some("/login"));
}

#[test]
fn test_navigate_student_mixed_case_commits_lowercase_path() {
    let mut router = Router::default();

    let nav = router.navigate("/Student/Bills", &student()).unwrap();

    assert_eq!(nav.path, "/student/bills");
    assert!(!nav.redirected);
}

#[test]
fn test_navigate_anonymous_register_allowed() {
    let mut router = Router::default();
    let nav = router.navigate("/register", &Session::anonymous()).unwrap();
    assert_eq!(nav.path, "/register");
    assert!(!nav.redirected);
}

// =========================================================================
// Authenticated users on entry screens
// =========================================================================

#[test]
fn test_navigate_admin_to_login_lands_on_admin_dashboard() {
    let mut router = Router::default();

    // The guard sends the admin to "/admin", which the table forwards.
    let nav = router.navigate("/login", &admin()).unwrap();

    assert_eq!(nav.path, "/admin/dashboard");
    assert!(nav.redirected);
}

#[test]
fn test_navigate_student_to_register_lands_on_student_dashboard() {
    let mut router = Router::default();
    let nav = router.navigate("/register", &student()).unwrap();
    assert_eq!(nav.path, "/student/dashboard");
}

#[test]
fn test_navigate_admin_to_root_lands_on_admin_dashboard() {
    // "/" → "/login" → guard → "/admin" → "/admin/dashboard"
    let mut router = Router::default();
    let nav = router.navigate("/", &admin()).unwrap();
    assert_eq!(nav.path, "/admin/dashboard");
}

// =========================================================================
// Wrong-role access
// =========================================================================

#[test]
fn test_navigate_student_to_admin_area_lands_on_student_dashboard() {
    let mut router = Router::default();
    let nav = router.navigate("/admin/bills", &student()).unwrap();
    assert_eq!(nav.path, "/student/dashboard");
}

#[test]
fn test_navigate_admin_to_student_area_lands_on_admin_dashboard() {
    let mut router = Router::default();
    let nav = router.navigate("/student/maintenance", &admin()).unwrap();
    assert_eq!(nav.path, "/admin/dashboard");
}

// =========================================================================
// Allowed transitions
// =========================================================================

#[test]
fn test_navigate_section_root_follows_static_redirect() {
    let mut router = Router::default();
    let nav = router.navigate("/student/", &student()).unwrap();
    assert_eq!(nav.path, "/student/dashboard");
    assert!(nav.redirected);
}

#[test]
fn test_navigate_query_string_is_dropped() {
    let mut router = Router::default();
    let nav = router.navigate("/admin/students?college=CS", &admin()).unwrap();
    assert_eq!(nav.path, "/admin/students");
    assert!(!nav.redirected);
}

#[test]
fn test_navigate_unknown_path_allowed_for_anyone() {
    let mut router = Router::default();
    let nav = router.navigate("/no/such/view", &Session::anonymous()).unwrap();
    assert_eq!(nav.path, "/no/such/view");
}

#[test]
fn test_navigate_session_change_changes_outcome() {
    // Same router, same target; only the session differs.
    let mut router = Router::default();

    assert_eq!(
        router.navigate("/admin/bills", &admin()).unwrap().path,
        "/admin/bills"
    );
    assert_eq!(
        router.navigate("/admin/bills", &Session::anonymous()).unwrap().path,
        "/login"
    );
}

// =========================================================================
// Guard against the standard table
// =========================================================================

#[test]
fn test_decide_every_route_never_sends_authenticated_user_to_login() {
    let table = RouteTable::standard();
    for session in [student(), admin()] {
        for entry in table.entries() {
            let decision = decide(&entry.descriptor, &session);
            assert_ne!(
                decision,
                Decision::Redirect("/login".into()),
                "{} as {:?}",
                entry.descriptor.path,
                session.role()
            );
        }
    }
}

#[test]
fn test_navigate_standard_table_never_loops() {
    let table = RouteTable::standard();
    let paths: Vec<String> = table.entries().map(|e| e.descriptor.path.clone()).collect();
    let mut router = Router::new(table);

    for session in [Session::anonymous(), student(), admin()] {
        for path in &paths {
            let result = router.navigate(path, &session);
            assert!(
                !matches!(result, Err(RouterError::RedirectLoop { .. })),
                "{path} looped for {:?}",
                session.role()
            );
        }
    }
}
