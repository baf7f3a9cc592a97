//! E-Laundry Providers — concrete implementations of the managed-backend
//! traits.
//!
//! The REST clients speak the hosted backend's wire protocols (an
//! identity-toolkit-style auth API and a `{path}.json` tree database); the
//! [`memory`] module provides in-process fakes with the same observable
//! behavior for tests and local development.

pub mod deletion;
pub mod error;
pub mod identity;
pub mod memory;
pub mod tree;

pub use deletion::HttpDeletionEndpoint;
pub use error::ProviderError;
pub use identity::RestIdentityProvider;
pub use memory::{MemoryIdentityProvider, MemoryTreeDatabase};
pub use tree::RestTreeDatabase;
