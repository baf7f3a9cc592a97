//! Role-gated navigation policy.
//!
//! A pure function of the current role. Logout is always visible; every
//! other entry is granted by the policy table. An unset or unrecognized
//! role matches no row and falls through to Logout alone.

use elaundry_core::models::Role;

use crate::routes::Route;

/// A navigation entry, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEntry {
    Home,
    Status,
    Sales,
    QrCode,
    SuperAdminHome,
    Logout,
}

impl NavEntry {
    pub fn label(&self) -> &'static str {
        match self {
            NavEntry::Home => "Home",
            NavEntry::Status => "Status",
            NavEntry::Sales => "Sales",
            NavEntry::QrCode => "QRCode",
            NavEntry::SuperAdminHome => "SuperAdmin Home",
            NavEntry::Logout => "Logout",
        }
    }

    /// Where the entry navigates. Logout lands on the unauthenticated entry
    /// point after the session is cleared.
    pub fn target(&self) -> Route {
        match self {
            NavEntry::Home => Route::AdminDashboard,
            NavEntry::Status => Route::Status,
            NavEntry::Sales => Route::Sales,
            NavEntry::QrCode => Route::QrCode,
            NavEntry::SuperAdminHome => Route::SuperAdminDashboard,
            NavEntry::Logout => Route::Login,
        }
    }
}

/// The visible entries for a role, in order.
pub fn entries_for(role: Option<Role>) -> Vec<NavEntry> {
    match role {
        Some(Role::Admin) => vec![
            NavEntry::Home,
            NavEntry::Status,
            NavEntry::Sales,
            NavEntry::QrCode,
            NavEntry::Logout,
        ],
        Some(Role::Superadmin) => vec![NavEntry::SuperAdminHome, NavEntry::Logout],
        None => vec![NavEntry::Logout],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_sees_the_full_row() {
        assert_eq!(
            entries_for(Some(Role::Admin)),
            vec![
                NavEntry::Home,
                NavEntry::Status,
                NavEntry::Sales,
                NavEntry::QrCode,
                NavEntry::Logout,
            ]
        );
    }

    #[test]
    fn superadmin_sees_only_its_home_and_logout() {
        assert_eq!(
            entries_for(Some(Role::Superadmin)),
            vec![NavEntry::SuperAdminHome, NavEntry::Logout]
        );
    }

    #[test]
    fn every_role_value_yields_exactly_one_logout() {
        // Covers the recognized roles plus the empty and bogus strings an
        // old persisted session might carry.
        for raw in ["admin", "superadmin", "", "bogus"] {
            let entries = entries_for(Role::parse(raw));
            let logouts = entries.iter().filter(|e| **e == NavEntry::Logout).count();
            assert_eq!(logouts, 1, "role {raw:?}");
        }
    }

    #[test]
    fn entries_link_to_their_screens() {
        assert_eq!(NavEntry::Home.target(), Route::AdminDashboard);
        assert_eq!(NavEntry::SuperAdminHome.target(), Route::SuperAdminDashboard);
        assert_eq!(NavEntry::Logout.target(), Route::Login);
        assert_eq!(NavEntry::QrCode.label(), "QRCode");
        assert_eq!(NavEntry::SuperAdminHome.label(), "SuperAdmin Home");
    }

    #[test]
    fn unrecognized_role_gets_logout_only() {
        assert_eq!(entries_for(Role::parse("bogus")), vec![NavEntry::Logout]);
        assert_eq!(entries_for(Role::parse("")), vec![NavEntry::Logout]);
    }
}
