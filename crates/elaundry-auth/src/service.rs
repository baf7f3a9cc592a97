//! Authentication service — login orchestration.

use elaundry_core::models::{Account, Role, Session};
use elaundry_core::provider::{IdentityProvider, TreeDatabase, paths};
use elaundry_core::{ElaundryError, ElaundryResult};
use elaundry_session::store::SessionStore;
use elaundry_session::{Route, SessionContext};
use tracing::{debug, info, warn};

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Non-fatal condition surfaced alongside a successful login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginWarning {
    /// The account is an admin but carries no shop linkage — a provisioning
    /// problem an operator has to fix, not a reason to block sign-in.
    ShopLinkageMissing,
}

/// Successful login result.
#[derive(Debug)]
pub struct LoginOutput {
    /// The session now held by the context and mirrored to storage.
    pub session: Session,
    /// Where to navigate: the dashboard matching the role, or the entry
    /// point when the role is unset or unrecognized.
    pub destination: Route,
    pub warning: Option<LoginWarning>,
    /// Short-lived provider credential for privileged calls. Never
    /// persisted.
    pub id_token: String,
}

/// Authentication service.
///
/// Generic over the backend traits so the flow layer has no dependency on
/// any concrete transport.
pub struct AuthService<I: IdentityProvider, D: TreeDatabase> {
    pub(crate) identity: I,
    pub(crate) db: D,
}

impl<I: IdentityProvider, D: TreeDatabase> AuthService<I, D> {
    pub fn new(identity: I, db: D) -> Self {
        Self { identity, db }
    }

    /// Authenticate, load the account record, and populate the session
    /// context.
    ///
    /// Steps run strictly sequentially; each call's completion gates the
    /// next. Nothing is retried — the user retries by submitting again.
    pub async fn login<S: SessionStore>(
        &self,
        input: LoginInput,
        context: &SessionContext<S>,
    ) -> ElaundryResult<LoginOutput> {
        // 1. Exchange credentials for an identity. Deliberately collapse
        //    every failure (wrong password, unknown email, transport) into
        //    one generic error.
        let user = match self.identity.authenticate(&input.email, &input.password).await {
            Ok(user) => user,
            Err(e) => {
                debug!(error = %e, "Authenticate step failed");
                return Err(ElaundryError::InvalidCredentials);
            }
        };

        // 2. Fetch the account record keyed by the provider-issued id.
        let record = self.db.get(&paths::user(&user.user_id)).await?;
        let Some(record) = record else {
            return Err(ElaundryError::AccountNotFound {
                user_id: user.user_id,
            });
        };

        // 3. Parse leniently: partial or legacy records must still sign in,
        //    and an unrecognized role simply matches no role-gated branch.
        let account: Account = serde_json::from_value(record)
            .map_err(|e| ElaundryError::Provider(format!("malformed account record: {e}")))?;
        let role = account.role();
        let session = Session {
            user_id: Some(user.user_id.clone()),
            shop_id: account.shop_id().map(str::to_string),
            role,
        };

        let warning = if session.is_admin_without_shop() {
            warn!(user_id = %user.user_id, "Admin account has no laundry shop linked");
            Some(LoginWarning::ShopLinkageMissing)
        } else {
            None
        };

        // 4. Populate the context wholesale and persist.
        context.replace(session.clone())?;

        // 5. Dispatch navigation by role.
        let destination = match role {
            Some(Role::Admin) => Route::AdminDashboard,
            Some(Role::Superadmin) => Route::SuperAdminDashboard,
            None => Route::Login,
        };

        info!(user_id = %user.user_id, role = role.map(|r| r.as_str()), "Login complete");
        Ok(LoginOutput {
            session,
            destination,
            warning,
            id_token: user.id_token,
        })
    }
}
