//! The session store: owns the current session and keeps storage in sync.
//!
//! This is the only place the session is mutated. It's responsible for:
//! - Loading the persisted session when the client starts
//! - Replacing the session in one step after a login
//! - Wiping it on logout or when the backend rejects the token
//!
//! # Concurrency note
//!
//! `SessionStore` is NOT thread-safe by itself. The client owns it behind
//! a mutex, and each `read`/`set`/`clear` runs under a single lock
//! acquisition, so no caller ever observes a half-applied change.

use dormdesk_protocol::Role;

use crate::{Credentials, KeyValueStore, Session, SessionError};

/// Storage key for the bearer token. Its absence means "no session".
pub const TOKEN_KEY: &str = "access_token";
/// Storage key for the role tag (`student` / `admin`).
pub const ROLE_KEY: &str = "user_type";
/// Storage key for the subject identifier.
pub const SUBJECT_KEY: &str = "user_id";

const ALL_KEYS: [&str; 3] = [TOKEN_KEY, ROLE_KEY, SUBJECT_KEY];

/// Owns the current [`Session`] and its durable copy.
///
/// ## Lifecycle
///
/// ```text
/// open() ──→ [Anonymous] ──set()──→ [Authenticated] ──clear()──→ [Anonymous]
///                 ↑                       │  ↑
///                 │                       └──┘ set() (re-login overwrites)
///                 └── open() after restart sees whatever was last persisted
/// ```
pub struct SessionStore<K: KeyValueStore> {
    session: Session,
    storage: K,
}

impl<K: KeyValueStore> SessionStore<K> {
    /// Loads the persisted session from `storage`.
    ///
    /// Never fails. If the token is present but the role or subject id is
    /// missing, or the role isn't one we know, the entries are ignored and
    /// the session starts anonymous.
    pub fn open(storage: K) -> Self {
        let session = load(&storage);
        match session.credentials() {
            Some(c) => tracing::info!(role = %c.role, subject = %c.subject_id, "restored persisted session"),
            None => tracing::debug!("starting with anonymous session"),
        }
        Self { session, storage }
    }

    /// Returns the current session.
    pub fn read(&self) -> Session {
        self.session.clone()
    }

    /// Borrows the current session without cloning.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replaces the session with a fully populated one.
    ///
    /// All three entries are persisted in one batch first; only then does
    /// the in-memory session change.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if persisting failed. The previous
    /// session (in memory and on disk) is left as it was.
    pub fn set(
        &mut self,
        token: impl Into<String>,
        role: Role,
        subject_id: impl Into<String>,
    ) -> Result<(), SessionError> {
        let credentials = Credentials {
            token: token.into(),
            role,
            subject_id: subject_id.into(),
        };

        self.storage.put_all(&[
            (TOKEN_KEY, credentials.token.as_str()),
            (ROLE_KEY, role.as_str()),
            (SUBJECT_KEY, credentials.subject_id.as_str()),
        ])?;

        tracing::info!(%role, subject = %credentials.subject_id, "session set");
        self.session = Session::authenticated(credentials.token, role, credentials.subject_id);
        Ok(())
    }

    /// Drops the session and removes its persisted entries.
    ///
    /// The in-memory session becomes anonymous even if the storage write
    /// fails: a credential we were told to forget is never used again by
    /// this process. Clearing an anonymous session changes nothing.
    ///
    /// # Errors
    /// Returns [`SessionError::Storage`] if the removal couldn't be persisted.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        let was_authenticated = !self.session.is_anonymous();
        self.session = Session::anonymous();
        self.storage.remove_all(&ALL_KEYS)?;
        if was_authenticated {
            tracing::info!("session cleared");
        }
        Ok(())
    }

    /// Borrows the backing storage.
    pub fn storage(&self) -> &K {
        &self.storage
    }
}

fn load<K: KeyValueStore>(storage: &K) -> Session {
    let Some(token) = storage.get(TOKEN_KEY) else {
        return Session::anonymous();
    };

    let role = storage.get(ROLE_KEY).and_then(|r| match r.parse::<Role>() {
        Ok(role) => Some(role),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring persisted session with unknown role");
            None
        }
    });

    match (role, storage.get(SUBJECT_KEY)) {
        (Some(role), Some(subject_id)) => Session::authenticated(token, role, subject_id),
        _ => {
            tracing::warn!("ignoring partially persisted session");
            Session::anonymous()
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionStore`.
    //!
    //! Naming convention: `test_{function}_{scenario}_{expected}`.

    use super::*;
    use crate::{MemoryStore, StorageError};

    // -- Helpers ----------------------------------------------------------

    /// A store whose writes can be switched to fail, for testing the
    /// "persist first, then mutate" ordering.
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: bool,
    }

    impl FlakyStore {
        fn failure() -> StorageError {
            StorageError::Io {
                path: "flaky".into(),
                source: std::io::Error::other("disk full"),
            }
        }
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn put_all(&mut self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(Self::failure());
            }
            self.inner.put_all(entries)
        }

        fn remove_all(&mut self, keys: &[&str]) -> Result<(), StorageError> {
            if self.fail_writes {
                return Err(Self::failure());
            }
            self.inner.remove_all(keys)
        }
    }

    fn empty_store() -> SessionStore<MemoryStore> {
        SessionStore::open(MemoryStore::new())
    }

    fn store_with(entries: &[(&str, &str)]) -> SessionStore<MemoryStore> {
        let mut storage = MemoryStore::new();
        storage.put_all(entries).unwrap();
        SessionStore::open(storage)
    }

    // =====================================================================
    // open()
    // =====================================================================

    #[test]
    fn test_open_empty_storage_is_anonymous() {
        assert!(empty_store().read().is_anonymous());
    }

    #[test]
    fn test_open_full_entries_restores_session() {
        let store = store_with(&[
            (TOKEN_KEY, "t1"),
            (ROLE_KEY, "student"),
            (SUBJECT_KEY, "123456789"),
        ]);

        assert_eq!(
            store.read(),
            Session::authenticated("t1", Role::Student, "123456789")
        );
    }

    #[test]
    fn test_open_token_without_role_is_anonymous() {
        let store = store_with(&[(TOKEN_KEY, "t1"), (SUBJECT_KEY, "s1")]);
        assert!(store.read().is_anonymous());
    }

    #[test]
    fn test_open_unknown_role_is_anonymous() {
        let store = store_with(&[
            (TOKEN_KEY, "t1"),
            (ROLE_KEY, "janitor"),
            (SUBJECT_KEY, "s1"),
        ]);
        assert!(store.read().is_anonymous());
    }

    #[test]
    fn test_open_role_without_token_is_anonymous() {
        let store = store_with(&[(ROLE_KEY, "admin"), (SUBJECT_KEY, "a1")]);
        assert!(store.read().is_anonymous());
    }

    // =====================================================================
    // set()
    // =====================================================================

    #[test]
    fn test_set_then_read_returns_exact_values() {
        let mut store = empty_store();

        store.set("t1", Role::Admin, "a1").expect("should persist");

        let session = store.read();
        assert_eq!(session.token(), Some("t1"));
        assert_eq!(session.role(), Some(Role::Admin));
        assert_eq!(session.subject_id(), Some("a1"));
    }

    #[test]
    fn test_set_persists_all_three_keys() {
        let mut store = empty_store();

        store.set("t1", Role::Student, "s1").unwrap();

        let storage = store.storage();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(storage.get(ROLE_KEY).as_deref(), Some("student"));
        assert_eq!(storage.get(SUBJECT_KEY).as_deref(), Some("s1"));
    }

    #[test]
    fn test_set_overwrites_previous_session() {
        let mut store = empty_store();
        store.set("t1", Role::Student, "s1").unwrap();

        store.set("t2", Role::Admin, "a9").unwrap();

        assert_eq!(store.read(), Session::authenticated("t2", Role::Admin, "a9"));
    }

    #[test]
    fn test_set_storage_failure_keeps_previous_session() {
        let mut store = SessionStore::open(FlakyStore::default());
        store.set("t1", Role::Student, "s1").unwrap();

        store.storage.fail_writes = true;
        let result = store.set("t2", Role::Admin, "a1");

        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert_eq!(
            store.read(),
            Session::authenticated("t1", Role::Student, "s1"),
            "failed set must not be observable"
        );
    }

    // =====================================================================
    // clear()
    // =====================================================================

    #[test]
    fn test_clear_then_read_is_anonymous() {
        let mut store = empty_store();
        store.set("t1", Role::Admin, "a1").unwrap();

        store.clear().expect("should persist");

        assert!(store.read().is_anonymous());
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_clear_anonymous_is_noop() {
        let mut store = empty_store();

        store.clear().expect("clearing nothing succeeds");
        store.clear().expect("and again");

        assert!(store.read().is_anonymous());
    }

    #[test]
    fn test_clear_storage_failure_still_forgets_in_memory() {
        let mut store = SessionStore::open(FlakyStore::default());
        store.set("t1", Role::Admin, "a1").unwrap();
        store.storage.fail_writes = true;

        let result = store.clear();

        assert!(matches!(result, Err(SessionError::Storage(_))));
        assert!(store.read().is_anonymous());
    }

    #[test]
    fn test_clear_leaves_unrelated_keys() {
        let mut storage = MemoryStore::new();
        storage.put_all(&[("theme", "dark")]).unwrap();
        let mut store = SessionStore::open(storage);
        store.set("t1", Role::Student, "s1").unwrap();

        store.clear().unwrap();

        assert_eq!(store.storage().get("theme").as_deref(), Some("dark"));
    }
}
