//! E-Laundry Server — the privileged deletion endpoint.
//!
//! One authenticated route, `POST /delete-user`, which removes a tenant and
//! its owning account from the managed backend. Generic over the backend
//! traits so the whole router runs against in-memory collaborators in
//! tests.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use elaundry_core::provider::{IdentityProvider, TreeDatabase};

pub use config::ServerConfig;
pub use error::ApiError;

/// Shared state for request handlers.
#[derive(Clone)]
pub struct AppState<I, D> {
    pub identity: I,
    pub db: D,
}

/// Build the application router.
///
/// `/health` is public; everything else sits behind the super-admin
/// bearer-token middleware.
pub fn router<I, D>(state: AppState<I, D>) -> Router
where
    I: IdentityProvider + Clone + 'static,
    D: TreeDatabase + Clone + 'static,
{
    let protected = Router::new()
        .route("/delete-user", post(handlers::delete_user::<I, D>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_superadmin::<I, D>,
        ));

    Router::new()
        .route("/health", get(handlers::health))
        .merge(protected)
        .with_state(state)
}
