//! Super-admin flows: the tenant list and the privileged deletion flow.

use elaundry_core::models::Shop;
use elaundry_core::provider::{DeletionEndpoint, TreeDatabase, paths};
use elaundry_core::{ElaundryError, ElaundryResult};
use serde_json::Value;
use tracing::{info, warn};

/// Holds the super-admin dashboard's tenant list and drives deletions
/// through the backend endpoint.
pub struct SuperAdminService<D: TreeDatabase, E: DeletionEndpoint> {
    db: D,
    deletion: E,
    shops: Vec<Shop>,
}

impl<D: TreeDatabase, E: DeletionEndpoint> SuperAdminService<D, E> {
    pub fn new(db: D, deletion: E) -> Self {
        Self {
            db,
            deletion,
            shops: Vec::new(),
        }
    }

    /// The current local list state.
    pub fn shops(&self) -> &[Shop] {
        &self.shops
    }

    /// Reload every shop record. An absent root node is an empty list, and
    /// a record that fails to parse is skipped rather than taking the whole
    /// dashboard down with it.
    pub async fn refresh(&mut self) -> ElaundryResult<&[Shop]> {
        let node = self.db.get(paths::LAUNDRY_SHOPS).await?;
        self.shops = match node {
            None => Vec::new(),
            Some(Value::Object(entries)) => entries
                .into_iter()
                .filter_map(|(key, value)| match serde_json::from_value::<Shop>(value) {
                    Ok(mut shop) => {
                        // Registration embeds the key as shop_id; fill it in
                        // for records that predate that.
                        if shop.shop_id.is_empty() {
                            shop.shop_id = key;
                        }
                        Some(shop)
                    }
                    Err(e) => {
                        warn!(shop_id = %key, error = %e, "Skipping malformed shop record");
                        None
                    }
                })
                .collect(),
            Some(_) => {
                return Err(ElaundryError::Provider(
                    "laundry_shops node is not an object".into(),
                ));
            }
        };
        Ok(&self.shops)
    }

    /// Delete a tenant together with its owning account.
    ///
    /// Both identifiers are required; an empty one fails locally with no
    /// network call. On success the matching entry leaves the local list
    /// and the backend's message is returned; on failure the backend's
    /// error message surfaces verbatim and the list is untouched.
    pub async fn delete_shop_admin(
        &mut self,
        admin_id: &str,
        shop_id: &str,
    ) -> ElaundryResult<String> {
        if admin_id.is_empty() || shop_id.is_empty() {
            return Err(ElaundryError::MissingIdentifiers);
        }

        let message = self.deletion.delete_user(admin_id, shop_id).await?;
        self.shops.retain(|shop| shop.shop_id != shop_id);
        info!(admin_id, shop_id, "Tenant and owning account deleted");
        Ok(message)
    }
}
