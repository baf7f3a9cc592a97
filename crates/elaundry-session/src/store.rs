//! Persisted session storage.
//!
//! The session triple survives restarts under the legacy key names
//! `userId` / `laundryShopId` / `userRole` — plain strings, no versioning.
//! `save` always writes all three keys together; `clear` erases all three,
//! so logout leaves no stale identifiers behind.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use elaundry_core::models::{Role, Session};
use elaundry_core::{ElaundryError, ElaundryResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Durable storage for the session triple.
pub trait SessionStore: Send + Sync {
    /// Read the persisted triple; fields default to absent when unset.
    fn load(&self) -> ElaundryResult<Session>;

    /// Write all three keys from the given session.
    fn save(&self, session: &Session) -> ElaundryResult<()>;

    /// Erase all three keys.
    fn clear(&self) -> ElaundryResult<()>;
}

/// On-disk layout: one JSON document with the browser-era key names.
#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedSession {
    #[serde(rename = "userId", default)]
    user_id: Option<String>,
    #[serde(rename = "laundryShopId", default)]
    laundry_shop_id: Option<String>,
    #[serde(rename = "userRole", default)]
    user_role: Option<String>,
}

impl PersistedSession {
    fn from_session(session: &Session) -> Self {
        Self {
            user_id: session.user_id.clone(),
            laundry_shop_id: session.shop_id.clone(),
            user_role: session.role.map(|r| r.as_str().to_string()),
        }
    }

    fn into_session(self) -> Session {
        Session {
            user_id: self.user_id,
            shop_id: self.laundry_shop_id,
            // Unrecognized stored roles fall through to "no role".
            role: self.user_role.as_deref().and_then(Role::parse),
        }
    }
}

/// File-backed session store: a single JSON document at a fixed path.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> ElaundryResult<Session> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Session::empty()),
            Err(e) => return Err(ElaundryError::Storage(e.to_string())),
        };

        match serde_json::from_str::<PersistedSession>(&raw) {
            Ok(persisted) => Ok(persisted.into_session()),
            Err(e) => {
                // Self-healing: a corrupt session file means a fresh login,
                // not a stuck client.
                warn!(path = %self.path.display(), error = %e, "Discarding malformed session file");
                Ok(Session::empty())
            }
        }
    }

    fn save(&self, session: &Session) -> ElaundryResult<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(|e| ElaundryError::Storage(e.to_string()))?;
        }
        let persisted = PersistedSession::from_session(session);
        let raw = serde_json::to_string_pretty(&persisted)
            .map_err(|e| ElaundryError::Storage(e.to_string()))?;
        fs::write(&self.path, raw).map_err(|e| ElaundryError::Storage(e.to_string()))
    }

    fn clear(&self) -> ElaundryResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ElaundryError::Storage(e.to_string())),
        }
    }
}

/// In-memory session store for tests. Clones share the same backing state.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    inner: Arc<Mutex<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a persisted session, as if left by a prior run.
    pub fn seeded(session: Session) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> ElaundryResult<Session> {
        Ok(self.inner.lock().expect("session store poisoned").clone())
    }

    fn save(&self, session: &Session) -> ElaundryResult<()> {
        *self.inner.lock().expect("session store poisoned") = session.clone();
        Ok(())
    }

    fn clear(&self) -> ElaundryResult<()> {
        *self.inner.lock().expect("session store poisoned") = Session::empty();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_as_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().unwrap(), Session::empty());
    }

    #[test]
    fn save_then_load_round_trips_the_triple() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));

        let session = Session {
            user_id: Some("u1".into()),
            shop_id: Some("s1".into()),
            role: Some(Role::Admin),
        };
        store.save(&session).unwrap();
        assert_eq!(store.load().unwrap(), session);
    }

    #[test]
    fn file_uses_legacy_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        store
            .save(&Session {
                user_id: Some("u1".into()),
                shop_id: Some("s1".into()),
                role: Some(Role::Superadmin),
            })
            .unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["userId"], "u1");
        assert_eq!(raw["laundryShopId"], "s1");
        assert_eq!(raw["userRole"], "superadmin");
    }

    #[test]
    fn malformed_file_loads_as_empty_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        assert_eq!(store.load().unwrap(), Session::empty());
    }

    #[test]
    fn unrecognized_stored_role_loads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(
            &path,
            r#"{"userId":"u1","laundryShopId":"s1","userRole":"bogus"}"#,
        )
        .unwrap();

        let store = FileSessionStore::new(&path);
        let session = store.load().unwrap();
        assert_eq!(session.user_id.as_deref(), Some("u1"));
        assert_eq!(session.role, None);
    }

    #[test]
    fn clear_erases_all_three_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = FileSessionStore::new(&path);

        store
            .save(&Session {
                user_id: Some("u1".into()),
                shop_id: Some("s1".into()),
                role: Some(Role::Admin),
            })
            .unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert_eq!(store.load().unwrap(), Session::empty());

        // Clearing twice is fine.
        store.clear().unwrap();
    }
}
