//! Account domain model.
//!
//! The account record lives at `users/{user_id}` in the tree database. It is
//! written in full by registration and read back by login. Reads are
//! lenient: records written by earlier application versions can miss fields
//! (including the shop linkage), and login must still complete.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::session::Role;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Account {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    /// Stored as a plain string; parse via [`Account::role`]. An
    /// unrecognized value disables role-gated behavior rather than erroring.
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laundry_shop_id: Option<String>,
    /// Absent in legacy records written before timestamps were normalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Account {
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    /// The shop linkage, treating the empty string as absent.
    pub fn shop_id(&self) -> Option<&str> {
        self.laundry_shop_id.as_deref().filter(|id| !id.is_empty())
    }
}
