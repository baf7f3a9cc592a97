//! Session domain model.
//!
//! The session is the only entity with a real lifecycle in this system: it
//! is created empty at process start, populated wholesale by login, and
//! cleared by logout. It is held in memory by the session context and
//! mirrored to durable local storage.

use serde::{Deserialize, Serialize};

/// The role attached to a signed-in account.
///
/// A closed set: anything else persisted or returned by the backend parses
/// to `None`, which disables every role-gated branch instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Administers exactly one laundry shop.
    Admin,
    /// Administers all shops; has no shop of its own.
    Superadmin,
}

impl Role {
    /// Parse the stored role string. Unrecognized values (including the
    /// empty string) yield `None` rather than an error.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "admin" => Some(Role::Admin),
            "superadmin" => Some(Role::Superadmin),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }
}

/// The current user's identity, tenant, and role.
///
/// All fields are independently optional: a logged-out session has none of
/// them, a super-admin session has no `shop_id`, and an under-provisioned
/// admin session may lack `shop_id` too (a configuration warning, never a
/// crash).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: Option<String>,
    pub shop_id: Option<String>,
    pub role: Option<Role>,
}

impl Session {
    pub fn empty() -> Self {
        Self::default()
    }

    /// A session counts as authenticated when `user_id` is present and
    /// non-empty. Empty strings are storable (no setter validation) but do
    /// not authenticate.
    pub fn is_authenticated(&self) -> bool {
        self.user_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    pub fn has_shop(&self) -> bool {
        self.shop_id.as_deref().is_some_and(|id| !id.is_empty())
    }

    /// The admin-implies-shop invariant is expected but not enforced; this
    /// flags the violation so callers can surface a configuration warning.
    pub fn is_admin_without_shop(&self) -> bool {
        self.role == Some(Role::Admin) && !self.has_shop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_only_the_closed_set() {
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("superadmin"), Some(Role::Superadmin));
        assert_eq!(Role::parse(""), None);
        assert_eq!(Role::parse("bogus"), None);
        assert_eq!(Role::parse("Admin"), None);
    }

    #[test]
    fn empty_user_id_does_not_authenticate() {
        let session = Session {
            user_id: Some(String::new()),
            ..Session::empty()
        };
        assert!(!session.is_authenticated());
    }

    #[test]
    fn admin_without_shop_is_flagged() {
        let session = Session {
            user_id: Some("u1".into()),
            shop_id: None,
            role: Some(Role::Admin),
        };
        assert!(session.is_admin_without_shop());

        let superadmin = Session {
            user_id: Some("u2".into()),
            shop_id: None,
            role: Some(Role::Superadmin),
        };
        assert!(!superadmin.is_admin_without_shop());
    }
}
