//! Declarative route authorization.
//!
//! One table maps every route to its required access; one guard evaluates
//! it. Keeping both the login check and the role check here means no screen
//! carries its own ad-hoc authorization logic.

use elaundry_core::models::{Role, Session};

/// Every navigable screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The unauthenticated entry point ("/").
    Login,
    Register,
    AdminDashboard,
    Status,
    Sales,
    QrCode,
    SuperAdminDashboard,
}

/// Access requirement for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Requires an authenticated session holding exactly this role.
    Role(Role),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Register => "/register",
            Route::AdminDashboard => "/admin-dashboard",
            Route::Status => "/status",
            Route::Sales => "/sales",
            Route::QrCode => "/qrcode",
            Route::SuperAdminDashboard => "/superadmin-dashboard",
        }
    }

    /// The route-authorization table.
    pub fn access(&self) -> Access {
        match self {
            Route::Login | Route::Register => Access::Public,
            Route::AdminDashboard | Route::Status | Route::Sales | Route::QrCode => {
                Access::Role(Role::Admin)
            }
            Route::SuperAdminDashboard => Access::Role(Role::Superadmin),
        }
    }
}

/// Outcome of a guard evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the guarded screen.
    Allow,
    /// Client-side redirect. `replace` drops the guarded screen from
    /// history so back-navigation cannot reach it.
    Redirect { to: Route, replace: bool },
}

/// Evaluate the table for one session and route.
///
/// Unauthenticated access to any protected route redirects to the entry
/// point; so does an authenticated session whose role does not match.
pub fn authorize(session: &Session, route: Route) -> RouteDecision {
    match route.access() {
        Access::Public => RouteDecision::Allow,
        Access::Role(required) => {
            if session.is_authenticated() && session.role == Some(required) {
                RouteDecision::Allow
            } else {
                RouteDecision::Redirect {
                    to: Route::Login,
                    replace: true,
                }
            }
        }
    }
}
