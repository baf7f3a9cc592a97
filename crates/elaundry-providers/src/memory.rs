//! In-memory implementations of the backend traits.
//!
//! Behaviorally equivalent to the REST clients (same error taxonomy, same
//! absent-node semantics) but entirely in-process. Used throughout the
//! workspace tests and suitable for local development. Clones share state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use elaundry_core::provider::{AuthenticatedUser, IdentityProvider, TreeDatabase};
use elaundry_core::{ElaundryError, ElaundryResult};
use serde_json::{Map, Value};

// ---------------------------------------------------------------------------
// Identity provider
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
struct IdentityState {
    /// email -> stored account
    accounts: HashMap<String, StoredAccount>,
    /// issued id token -> user id
    tokens: HashMap<String, String>,
    next_id: u32,
}

#[derive(Debug, Clone)]
struct StoredAccount {
    user_id: String,
    password: String,
}

/// In-memory identity provider with deterministic generated ids
/// (`user-1`, `user-2`, …) and opaque issued tokens.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentityProvider {
    inner: Arc<Mutex<IdentityState>>,
}

impl MemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an account with a caller-chosen user id.
    pub fn insert_account(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
        user_id: impl Into<String>,
    ) {
        let mut state = self.inner.lock().expect("identity state poisoned");
        state.accounts.insert(
            email.into(),
            StoredAccount {
                user_id: user_id.into(),
                password: password.into(),
            },
        );
    }

    /// Issue a valid id token for an existing user id.
    pub fn issue_token(&self, user_id: impl Into<String>) -> String {
        let mut state = self.inner.lock().expect("identity state poisoned");
        state.next_id += 1;
        let token = format!("token-{}", state.next_id);
        state.tokens.insert(token.clone(), user_id.into());
        token
    }

    pub fn has_account(&self, email: &str) -> bool {
        self.inner
            .lock()
            .expect("identity state poisoned")
            .accounts
            .contains_key(email)
    }
}

impl IdentityProvider for MemoryIdentityProvider {
    async fn authenticate(&self, email: &str, password: &str) -> ElaundryResult<AuthenticatedUser> {
        let mut state = self.inner.lock().expect("identity state poisoned");
        let account = state
            .accounts
            .get(email)
            .filter(|a| a.password == password)
            .cloned()
            .ok_or(ElaundryError::InvalidCredentials)?;

        state.next_id += 1;
        let token = format!("token-{}", state.next_id);
        state.tokens.insert(token.clone(), account.user_id.clone());
        Ok(AuthenticatedUser {
            user_id: account.user_id,
            id_token: token,
        })
    }

    async fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> ElaundryResult<AuthenticatedUser> {
        let mut state = self.inner.lock().expect("identity state poisoned");
        if state.accounts.contains_key(email) {
            return Err(ElaundryError::EmailAlreadyInUse);
        }

        state.next_id += 1;
        let user_id = format!("user-{}", state.next_id);
        state.accounts.insert(
            email.to_string(),
            StoredAccount {
                user_id: user_id.clone(),
                password: password.to_string(),
            },
        );

        state.next_id += 1;
        let token = format!("token-{}", state.next_id);
        state.tokens.insert(token.clone(), user_id.clone());
        Ok(AuthenticatedUser {
            user_id,
            id_token: token,
        })
    }

    async fn delete_account(&self, user_id: &str) -> ElaundryResult<()> {
        let mut state = self.inner.lock().expect("identity state poisoned");
        let email = state
            .accounts
            .iter()
            .find(|(_, a)| a.user_id == user_id)
            .map(|(email, _)| email.clone())
            .ok_or_else(|| {
                ElaundryError::Provider(format!("no identity account for {user_id}"))
            })?;
        state.accounts.remove(&email);
        state.tokens.retain(|_, uid| uid != user_id);
        Ok(())
    }

    async fn verify_token(&self, id_token: &str) -> ElaundryResult<String> {
        self.inner
            .lock()
            .expect("identity state poisoned")
            .tokens
            .get(id_token)
            .cloned()
            .ok_or_else(|| ElaundryError::Provider("invalid or expired id token".into()))
    }
}

// ---------------------------------------------------------------------------
// Tree database
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct TreeState {
    root: Value,
    writes: usize,
}

impl Default for TreeState {
    fn default() -> Self {
        Self {
            root: Value::Null,
            writes: 0,
        }
    }
}

/// In-memory path-addressed JSON tree.
#[derive(Debug, Clone, Default)]
pub struct MemoryTreeDatabase {
    inner: Arc<Mutex<TreeState>>,
}

impl MemoryTreeDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of mutating calls (`set` / `update` / `remove`) so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().expect("tree state poisoned").writes
    }

    /// A copy of the whole tree.
    pub fn snapshot(&self) -> Value {
        self.inner.lock().expect("tree state poisoned").root.clone()
    }

    fn segments(path: &str) -> Vec<String> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Walk to `path`, materializing intermediate objects.
    fn node_mut<'a>(root: &'a mut Value, segments: &[String]) -> &'a mut Value {
        let mut current = root;
        for segment in segments {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            current = current
                .as_object_mut()
                .expect("just materialized an object")
                .entry(segment.clone())
                .or_insert(Value::Null);
        }
        current
    }
}

impl TreeDatabase for MemoryTreeDatabase {
    async fn get(&self, path: &str) -> ElaundryResult<Option<Value>> {
        let state = self.inner.lock().expect("tree state poisoned");
        let mut current = &state.root;
        for segment in Self::segments(path) {
            match current.get(&segment) {
                Some(next) => current = next,
                None => return Ok(None),
            }
        }
        Ok(if current.is_null() {
            None
        } else {
            Some(current.clone())
        })
    }

    async fn set(&self, path: &str, value: &Value) -> ElaundryResult<()> {
        let mut state = self.inner.lock().expect("tree state poisoned");
        state.writes += 1;
        let segments = Self::segments(path);
        *Self::node_mut(&mut state.root, &segments) = value.clone();
        Ok(())
    }

    async fn update(&self, path: &str, fields: &Map<String, Value>) -> ElaundryResult<()> {
        let mut state = self.inner.lock().expect("tree state poisoned");
        state.writes += 1;
        let segments = Self::segments(path);
        let node = Self::node_mut(&mut state.root, &segments);
        if !node.is_object() {
            *node = Value::Object(Map::new());
        }
        let object = node.as_object_mut().expect("just materialized an object");
        for (key, value) in fields {
            object.insert(key.clone(), value.clone());
        }
        Ok(())
    }

    async fn remove(&self, path: &str) -> ElaundryResult<()> {
        let mut state = self.inner.lock().expect("tree state poisoned");
        state.writes += 1;
        let segments = Self::segments(path);
        let Some((leaf, parents)) = segments.split_last() else {
            state.root = Value::Null;
            return Ok(());
        };

        let mut current = &mut state.root;
        for segment in parents {
            match current.get_mut(segment) {
                Some(next) => current = next,
                // Removing under an absent parent is a no-op.
                None => return Ok(()),
            }
        }
        if let Some(object) = current.as_object_mut() {
            object.remove(leaf);
        }
        Ok(())
    }
}
