//! Integration tests covering hydration from a persisted session file
//! through to navigation and route authorization.

use elaundry_core::models::{Role, Session};
use elaundry_session::{
    FileSessionStore, NavEntry, Route, RouteDecision, SessionContext, SessionStore, authorize,
    entries_for,
};

/// Write a persisted admin session and hydrate a fresh context from it.
fn hydrated_admin_context(dir: &tempfile::TempDir) -> SessionContext<FileSessionStore> {
    let store = FileSessionStore::new(dir.path().join("session.json"));
    store
        .save(&Session {
            user_id: Some("u1".into()),
            shop_id: Some("s1".into()),
            role: Some(Role::Admin),
        })
        .unwrap();
    SessionContext::hydrate(store).unwrap()
}

#[test]
fn hydrated_admin_session_gets_the_admin_navigation_row() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = hydrated_admin_context(&dir);

    let session = ctx.snapshot();
    assert_eq!(session.user_id.as_deref(), Some("u1"));
    assert_eq!(session.shop_id.as_deref(), Some("s1"));
    assert_eq!(session.role, Some(Role::Admin));

    assert_eq!(
        entries_for(session.role),
        vec![
            NavEntry::Home,
            NavEntry::Status,
            NavEntry::Sales,
            NavEntry::QrCode,
            NavEntry::Logout,
        ]
    );
}

#[test]
fn hydrated_admin_session_passes_the_admin_guard() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = hydrated_admin_context(&dir);

    let session = ctx.snapshot();
    assert_eq!(authorize(&session, Route::AdminDashboard), RouteDecision::Allow);
    assert!(matches!(
        authorize(&session, Route::SuperAdminDashboard),
        RouteDecision::Redirect { to: Route::Login, replace: true }
    ));
}

#[test]
fn logout_then_rehydrate_yields_an_empty_session() {
    let dir = tempfile::tempdir().unwrap();
    let ctx = hydrated_admin_context(&dir);
    ctx.logout().unwrap();

    // A second process start sees no session at all.
    let store = FileSessionStore::new(dir.path().join("session.json"));
    let rehydrated = SessionContext::hydrate(store).unwrap();
    assert_eq!(rehydrated.snapshot(), Session::empty());
    assert_eq!(entries_for(rehydrated.snapshot().role), vec![NavEntry::Logout]);
}
