//! Integration tests: a session written through `FileStore` is what the
//! next process start observes.

use dormdesk_protocol::Role;
use dormdesk_session::{FileStore, KeyValueStore, Session, SessionStore, TOKEN_KEY};

#[test]
fn test_reload_after_set_restores_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let mut store = SessionStore::open(FileStore::open(&path).unwrap());
        store.set("t1", Role::Admin, "a1").unwrap();
    }

    let store = SessionStore::open(FileStore::open(&path).unwrap());
    assert_eq!(store.read(), Session::authenticated("t1", Role::Admin, "a1"));
}

#[test]
fn test_reload_after_clear_is_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    {
        let mut store = SessionStore::open(FileStore::open(&path).unwrap());
        store.set("t1", Role::Student, "123456789").unwrap();
        store.clear().unwrap();
    }

    let store = SessionStore::open(FileStore::open(&path).unwrap());
    assert!(store.read().is_anonymous());
    assert_eq!(store.storage().get(TOKEN_KEY), None);
}

#[test]
fn test_reload_with_hand_edited_partial_file_is_anonymous() {
    // Someone deleted the role line from the file by hand.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");
    std::fs::write(&path, br#"{"access_token":"t1","user_id":"a1"}"#).unwrap();

    let store = SessionStore::open(FileStore::open(&path).unwrap());

    assert!(store.read().is_anonymous());
}
