//! Error types for the E-Laundry system.
//!
//! One variant per user-visible failure. Every external call site converts
//! into this taxonomy and returns; nothing is retried automatically and no
//! failure is fatal to the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ElaundryError {
    /// Sign-in failed. Deliberately generic: the user cannot tell a wrong
    /// password from a transport failure during the authenticate step.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The identity provider knows the user but the tree database has no
    /// matching account record.
    #[error("No account record found for user {user_id}")]
    AccountNotFound { user_id: String },

    /// Registration conflict reported by the identity provider.
    #[error("This email is already in use")]
    EmailAlreadyInUse,

    /// Privileged deletion was invoked without both required identifiers.
    /// Checked locally, before any network call.
    #[error("Missing user or shop identifier")]
    MissingIdentifiers,

    /// Catch-all for unexpected provider or backend failures. The message is
    /// passed through verbatim to the user.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Local session storage failed to read or write.
    #[error("Session storage error: {0}")]
    Storage(String),
}

pub type ElaundryResult<T> = Result<T, ElaundryError>;
