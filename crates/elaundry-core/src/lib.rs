//! E-Laundry Core — domain models, error types, and the traits for the
//! external managed backend (identity provider + JSON tree database).
//!
//! Everything stateful lives behind the traits in [`provider`]; the rest of
//! the workspace is written against those seams so flows can be exercised
//! with in-memory collaborators.

pub mod error;
pub mod models;
pub mod provider;

pub use error::{ElaundryError, ElaundryResult};
