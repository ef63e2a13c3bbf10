//! Session durability across store restarts

use pitwatch_session::{FileStorage, SessionStorage, SessionStore, UserPatch};
use std::fs;
use std::path::PathBuf;

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("pitwatch-session-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn file(&self) -> PathBuf {
        self.0.join("session.json")
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.0);
    }
}

#[test]
fn test_session_survives_restart() {
    let dir = TempDir::new();

    let mut store = SessionStore::open(FileStorage::new(dir.file()));
    assert!(store.sign_in("sarah.wilson@example.com", "hunter22"));
    drop(store);

    let reopened = SessionStore::open(FileStorage::new(dir.file()));
    assert!(reopened.is_authenticated());
    let user = reopened.user().unwrap();
    assert_eq!(user.name, "Sarah Wilson");
    assert_eq!(user.email, "sarah.wilson@example.com");
}

#[test]
fn test_update_is_written_through() {
    let dir = TempDir::new();

    let mut store = SessionStore::open(FileStorage::new(dir.file()));
    store.sign_in("a@b.com", "123456");
    store.update_user(UserPatch {
        avatar: Some("/avatars/a.png".to_string()),
        ..UserPatch::default()
    });

    let reopened = SessionStore::open(FileStorage::new(dir.file()));
    assert_eq!(
        reopened.user().unwrap().avatar.as_deref(),
        Some("/avatars/a.png")
    );
}

#[test]
fn test_sign_out_removes_stored_session() {
    let dir = TempDir::new();

    let mut store = SessionStore::open(FileStorage::new(dir.file()));
    store.sign_in("a@b.com", "123456");
    store.sign_out();

    assert!(!dir.file().exists());
    assert!(!SessionStore::open(FileStorage::new(dir.file())).is_authenticated());
}

#[test]
fn test_corrupt_user_record_is_dropped() {
    let dir = TempDir::new();
    fs::write(dir.file(), r#"{"user": "{\"id\": 1, broken"}"#).unwrap();

    let store = SessionStore::open(FileStorage::new(dir.file()));
    assert!(!store.is_authenticated());
    assert_eq!(FileStorage::new(dir.file()).load().unwrap(), None);
}

#[test]
fn test_unparsable_file_is_treated_as_signed_out() {
    let dir = TempDir::new();
    fs::write(dir.file(), "\u{0}\u{1} garbage").unwrap();

    let mut store = SessionStore::open(FileStorage::new(dir.file()));
    assert!(!store.is_authenticated());

    // The next sign-in replaces the bad file
    assert!(store.sign_in("a@b.com", "123456"));
    assert!(SessionStore::open(FileStorage::new(dir.file())).is_authenticated());
}
