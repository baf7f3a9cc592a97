//! Provider-layer error types and conversions.

use elaundry_core::ElaundryError;

/// Error raised by the REST provider clients before conversion into the
/// core taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a non-success status. The message is the
    /// provider's own error text.
    #[error("{0}")]
    Rejected(String),

    /// The provider answered 2xx but the body did not have the expected
    /// shape.
    #[error("malformed provider response: {0}")]
    Decode(String),

    /// Identity provider code `EMAIL_EXISTS`.
    #[error("email already in use")]
    EmailExists,

    /// Identity provider rejected the credentials (wrong password, unknown
    /// email, or disabled account — not distinguished).
    #[error("invalid credentials")]
    BadCredentials,
}

impl From<ProviderError> for ElaundryError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::EmailExists => ElaundryError::EmailAlreadyInUse,
            ProviderError::BadCredentials => ElaundryError::InvalidCredentials,
            other => ElaundryError::Provider(other.to_string()),
        }
    }
}
