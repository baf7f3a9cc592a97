//! Trait definitions for the external managed backend.
//!
//! All operations are async. Authentication, account storage, and tenant
//! storage are delegated wholesale to these collaborators; this codebase
//! owns no credential material and no storage engine. Every flow is generic
//! over these traits so it can run against in-memory fakes in tests.

use serde_json::{Map, Value};

use crate::error::ElaundryResult;

/// The identity the provider hands back after a successful authenticate or
/// account-creation call.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Opaque provider-issued user id.
    pub user_id: String,
    /// Short-lived credential proving the sign-in. Presented as a bearer
    /// token to privileged endpoints; never persisted.
    pub id_token: String,
}

/// The password identity provider.
pub trait IdentityProvider: Send + Sync {
    /// Exchange credentials for an identity. Failure reasons are not
    /// distinguished to callers beyond the error taxonomy.
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = ElaundryResult<AuthenticatedUser>> + Send;

    /// Provision a new account. A duplicate email surfaces as
    /// [`ElaundryError::EmailAlreadyInUse`].
    ///
    /// [`ElaundryError::EmailAlreadyInUse`]: crate::error::ElaundryError::EmailAlreadyInUse
    fn create_account(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = ElaundryResult<AuthenticatedUser>> + Send;

    /// Permanently delete an account. Privileged; server-side only.
    fn delete_account(&self, user_id: &str) -> impl Future<Output = ElaundryResult<()>> + Send;

    /// Validate an id token and return the user id it was issued for.
    fn verify_token(&self, id_token: &str)
    -> impl Future<Output = ElaundryResult<String>> + Send;
}

/// The path-addressed JSON tree database.
///
/// Paths are slash-separated (`users/u1`); values are arbitrary JSON
/// subtrees. An absent node reads as `None`, matching the backend's
/// convention of returning `null` for missing paths.
pub trait TreeDatabase: Send + Sync {
    fn get(&self, path: &str) -> impl Future<Output = ElaundryResult<Option<Value>>> + Send;

    /// Replace the subtree at `path` with `value`.
    fn set(&self, path: &str, value: &Value) -> impl Future<Output = ElaundryResult<()>> + Send;

    /// Merge `fields` into the object at `path`, leaving siblings intact.
    fn update(
        &self,
        path: &str,
        fields: &Map<String, Value>,
    ) -> impl Future<Output = ElaundryResult<()>> + Send;

    /// Delete the subtree at `path`. Removing an absent path is not an
    /// error.
    fn remove(&self, path: &str) -> impl Future<Output = ElaundryResult<()>> + Send;
}

/// The privileged deletion endpoint, as seen from the client side.
///
/// The backend deletes the identity account and both database records in
/// one request; the caller only learns success (with a message) or failure
/// (with the backend's error message, passed through verbatim).
pub trait DeletionEndpoint: Send + Sync {
    fn delete_user(
        &self,
        user_id: &str,
        shop_id: &str,
    ) -> impl Future<Output = ElaundryResult<String>> + Send;
}

/// Well-known tree-database paths.
pub mod paths {
    /// Root node holding every shop record.
    pub const LAUNDRY_SHOPS: &str = "laundry_shops";

    pub fn user(user_id: &str) -> String {
        format!("users/{user_id}")
    }

    pub fn shop(shop_id: &str) -> String {
        format!("{LAUNDRY_SHOPS}/{shop_id}")
    }
}
