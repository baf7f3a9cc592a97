//! E-Laundry Auth — credential flows against the managed backend.
//!
//! [`AuthService`] handles login and registration; [`SuperAdminService`]
//! holds the super-admin tenant list and drives the privileged deletion
//! flow. Both are generic over the backend traits so every flow runs
//! against in-memory collaborators in tests.

pub mod registration;
pub mod service;
pub mod superadmin;

pub use registration::{RegistrationInput, RegistrationOutput};
pub use service::{AuthService, LoginInput, LoginOutput, LoginWarning};
pub use superadmin::SuperAdminService;
