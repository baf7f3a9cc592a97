//! Super-admin authentication middleware.
//!
//! Fail-closed: every request to a protected route must carry a bearer id
//! token that the identity provider verifies, and the resolved account must
//! hold the `superadmin` role. Missing or bad tokens are 401; a valid token
//! for any other role is 403.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use elaundry_core::models::{Account, Role};
use elaundry_core::provider::{IdentityProvider, TreeDatabase, paths};
use tracing::debug;

use crate::AppState;
use crate::error::ApiError;

pub async fn require_superadmin<I, D>(
    State(state): State<AppState<I, D>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError>
where
    I: IdentityProvider + Clone + 'static,
    D: TreeDatabase + Clone + 'static,
{
    let token = request
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".into()))?;

    let caller_id = state
        .identity
        .verify_token(token)
        .await
        .map_err(|e| {
            debug!(error = %e, "Token verification failed");
            ApiError::Unauthorized("Invalid or expired token".into())
        })?;

    let record = state
        .db
        .get(&paths::user(&caller_id))
        .await
        .map_err(ApiError::from)?
        .ok_or(ApiError::Forbidden)?;
    let account: Account = serde_json::from_value(record)
        .map_err(|e| ApiError::Internal(format!("malformed account record: {e}")))?;

    if account.role() != Some(Role::Superadmin) {
        debug!(caller_id = %caller_id, role = %account.role, "Caller is not a super-admin");
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(request).await)
}
