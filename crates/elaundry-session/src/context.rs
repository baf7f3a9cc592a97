//! The session context — the single authoritative in-memory session holder.
//!
//! Constructed via [`SessionContext::hydrate`], which loads persisted state
//! before the context becomes observable. That constructor is the "ready
//! gate": consumers are injected with an already-hydrated context and never
//! read storage directly, so there is no first-render window in which the
//! role is missing.

use std::sync::Mutex;

use elaundry_core::ElaundryResult;
use elaundry_core::models::{Role, Session};
use tracing::debug;

use crate::store::SessionStore;

/// In-memory session state synchronized with a [`SessionStore`].
///
/// Mutation is serialized through an internal lock, so the context is safe
/// to share behind an `Arc` even though the application model is a single
/// event thread.
pub struct SessionContext<S: SessionStore> {
    store: S,
    state: Mutex<Session>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Load the persisted session and return a ready context. Any persisted
    /// field becomes the initial in-memory value; absent fields stay unset.
    pub fn hydrate(store: S) -> ElaundryResult<Self> {
        let session = store.load()?;
        debug!(
            authenticated = session.is_authenticated(),
            role = session.role.map(|r| r.as_str()),
            "Session context hydrated"
        );
        Ok(Self {
            store,
            state: Mutex::new(session),
        })
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.lock().expect("session context poisoned").clone()
    }

    /// Set the user id. No validation: any string, including the empty
    /// string, is accepted.
    pub fn set_user_id(&self, user_id: impl Into<String>) -> ElaundryResult<()> {
        self.mutate(|s| s.user_id = Some(user_id.into()))
    }

    /// Set the shop id. No validation, as above.
    pub fn set_shop_id(&self, shop_id: impl Into<String>) -> ElaundryResult<()> {
        self.mutate(|s| s.shop_id = Some(shop_id.into()))
    }

    /// Set or clear the role.
    pub fn set_role(&self, role: Option<Role>) -> ElaundryResult<()> {
        self.mutate(|s| s.role = role)
    }

    /// Populate the session wholesale (login path) and persist
    /// unconditionally: login writes all three keys even when the shop
    /// linkage is missing.
    pub fn replace(&self, session: Session) -> ElaundryResult<()> {
        *self.state.lock().expect("session context poisoned") = session.clone();
        self.store.save(&session)
    }

    /// Clear the whole session, in memory and in the store.
    pub fn logout(&self) -> ElaundryResult<()> {
        *self.state.lock().expect("session context poisoned") = Session::empty();
        self.store.clear()
    }

    /// Apply a mutation, then persist if the convergence condition holds:
    /// once `user_id` and `shop_id` are both non-empty, the stored triple
    /// must equal the in-memory triple.
    fn mutate(&self, f: impl FnOnce(&mut Session)) -> ElaundryResult<()> {
        let snapshot = {
            let mut state = self.state.lock().expect("session context poisoned");
            f(&mut state);
            state.clone()
        };
        if snapshot.is_authenticated() && snapshot.has_shop() {
            self.store.save(&snapshot)?;
        }
        Ok(())
    }
}
