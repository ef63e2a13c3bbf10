//! Sign-in flows gating the dashboard routes

use pitwatch_session::{FileStorage, SessionStore, SIGN_IN_ROUTE};

use crate::test_utils::{init_test_logging, TempDir};

#[test]
fn test_sign_in_derives_display_name() {
    init_test_logging();
    let dir = TempDir::new("pitwatch-it-session");
    let mut store = SessionStore::open(FileStorage::new(dir.join("session.json")));

    assert!(!store.sign_in("bad", "123456"));
    assert!(!store.is_authenticated());

    assert!(store.sign_in("a@b.com", "123456"));
    assert_eq!(store.user().map(|u| u.name.as_str()), Some("A"));
}

#[test]
fn test_routes_open_after_sign_in_and_close_after_sign_out() {
    let dir = TempDir::new("pitwatch-it-routes");
    let path = dir.join("session.json");

    let mut store = SessionStore::open(FileStorage::new(&path));
    for route in ["/", "/machines", "/users", "/notifications"] {
        assert_eq!(store.redirect_for(route), Some(SIGN_IN_ROUTE));
    }
    assert_eq!(store.redirect_for("/auth/signin"), None);

    store.sign_in("jane.doe@example.com", "secret1");
    let restarted = SessionStore::open(FileStorage::new(&path));
    assert_eq!(restarted.redirect_for("/machines"), None);
    assert_eq!(restarted.user().map(|u| u.name.as_str()), Some("Jane Doe"));

    let mut restarted = restarted;
    assert_eq!(restarted.sign_out().location, SIGN_IN_ROUTE);
    assert_eq!(
        SessionStore::open(FileStorage::new(&path)).redirect_for("/machines"),
        Some(SIGN_IN_ROUTE)
    );
}
