//! Registration — account + tenant provisioning as a compensating saga.
//!
//! Three writes have to land together: the identity-provider account, the
//! shop record, and the account record linking the two. When a later step
//! fails, the earlier steps are undone in reverse order; a compensation
//! that itself fails leaves an orphan, which is logged for offline
//! reconciliation rather than silently dropped.

use chrono::Utc;
use elaundry_core::models::{Account, Role, Shop, ShopStatus};
use elaundry_core::provider::{IdentityProvider, TreeDatabase, paths};
use elaundry_core::{ElaundryError, ElaundryResult};
use tracing::{error, info};
use uuid::Uuid;

use crate::service::AuthService;

/// Everything the registration form collects.
#[derive(Debug)]
pub struct RegistrationInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub country: String,
    pub city: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug)]
pub struct RegistrationOutput {
    pub user_id: String,
    pub shop_id: String,
}

/// Undo actions for completed saga steps, executed in reverse on failure.
#[derive(Debug, Clone, Copy)]
enum Compensation {
    DeleteIdentityAccount,
    RemoveShopRecord,
}

impl<I: IdentityProvider, D: TreeDatabase> AuthService<I, D> {
    /// Provision a new admin account and its tenant.
    ///
    /// A duplicate email surfaces as [`ElaundryError::EmailAlreadyInUse`];
    /// any other provider rejection passes its message through.
    pub async fn register(&self, input: RegistrationInput) -> ElaundryResult<RegistrationOutput> {
        // 1. Identity account first: without it there is nothing to link.
        let user = self.identity.create_account(&input.email, &input.password).await?;
        let mut done = vec![Compensation::DeleteIdentityAccount];

        // 2. Collision-resistant tenant id.
        let shop_id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let shop = Shop {
            shop_id: shop_id.clone(),
            name: if input.name.is_empty() {
                "Default Shop Name".to_string()
            } else {
                input.name.clone()
            },
            address: format!("{}, {}, {}", input.address, input.city, input.country),
            phone: input.phone.clone(),
            admin_id: user.user_id.clone(),
            latitude: input.latitude,
            longitude: input.longitude,
            status: ShopStatus::Active,
            created_at: Some(now),
            updated_at: Some(now),
        };

        // 3. Tenant record.
        if let Err(e) = self.write_record(&paths::shop(&shop_id), &shop).await {
            self.compensate(&done, &user.user_id, &shop_id).await;
            return Err(e);
        }
        done.push(Compensation::RemoveShopRecord);

        // 4. Account record referencing the tenant.
        let account = Account {
            user_id: user.user_id.clone(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            role: Role::Admin.as_str().to_string(),
            laundry_shop_id: Some(shop_id.clone()),
            created_at: Some(now),
        };
        if let Err(e) = self.write_record(&paths::user(&user.user_id), &account).await {
            self.compensate(&done, &user.user_id, &shop_id).await;
            return Err(e);
        }

        info!(user_id = %user.user_id, shop_id = %shop_id, "Registration complete");
        Ok(RegistrationOutput {
            user_id: user.user_id,
            shop_id,
        })
    }

    async fn write_record<T: serde::Serialize>(&self, path: &str, record: &T) -> ElaundryResult<()> {
        let value = serde_json::to_value(record)
            .map_err(|e| ElaundryError::Provider(format!("failed to encode record: {e}")))?;
        self.db.set(path, &value).await
    }

    /// Run the undo actions for completed steps, newest first. Failures are
    /// logged as orphan candidates; there is nothing further to do online.
    async fn compensate(&self, done: &[Compensation], user_id: &str, shop_id: &str) {
        for step in done.iter().rev() {
            let result = match step {
                Compensation::DeleteIdentityAccount => self.identity.delete_account(user_id).await,
                Compensation::RemoveShopRecord => self.db.remove(&paths::shop(shop_id)).await,
            };
            if let Err(e) = result {
                error!(
                    user_id,
                    shop_id,
                    step = ?step,
                    error = %e,
                    "Registration compensation failed; orphan candidate"
                );
            }
        }
    }
}
