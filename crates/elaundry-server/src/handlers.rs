//! HTTP request handlers.

use axum::Json;
use axum::extract::State;
use elaundry_core::provider::{IdentityProvider, TreeDatabase, paths};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::AppState;
use crate::error::ApiError;

/// Request body for `POST /delete-user`. Absent fields deserialize to
/// empty strings and fail the local precondition.
#[derive(Debug, Deserialize)]
pub struct DeleteUserRequest {
    #[serde(rename = "userId", default)]
    pub user_id: String,
    #[serde(rename = "shopId", default)]
    pub shop_id: String,
}

#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Delete a tenant's owning account and both of its database records.
///
/// The three steps run strictly in order with no rollback; a failure after
/// the first step leaves partial state, reported to the caller only as a
/// generic error. Each completed step is logged so that partial failures
/// can be reconstructed from the trace.
pub async fn delete_user<I, D>(
    State(state): State<AppState<I, D>>,
    Json(request): Json<DeleteUserRequest>,
) -> Result<Json<DeleteUserResponse>, ApiError>
where
    I: IdentityProvider + Clone + 'static,
    D: TreeDatabase + Clone + 'static,
{
    if request.user_id.is_empty() || request.shop_id.is_empty() {
        return Err(ApiError::MissingIdentifiers);
    }

    // Step 1: identity-provider account.
    state.identity.delete_account(&request.user_id).await?;
    info!(user_id = %request.user_id, "Deleted identity account");

    // Step 2: account record.
    state.db.remove(&paths::user(&request.user_id)).await?;
    info!(user_id = %request.user_id, "Removed account record");

    // Step 3: shop record.
    state.db.remove(&paths::shop(&request.shop_id)).await?;
    info!(shop_id = %request.shop_id, "Removed shop record");

    Ok(Json(DeleteUserResponse {
        message: "User and associated data deleted successfully.".into(),
    }))
}
