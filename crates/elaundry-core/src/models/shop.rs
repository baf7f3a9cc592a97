//! Shop (tenant) domain model.
//!
//! A shop is an independently managed laundry business owned by exactly one
//! admin account, stored at `laundry_shops/{shop_id}`. Created by
//! registration alongside its owning account; deleted together with it by
//! the privileged deletion flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShopStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Shop {
    #[serde(default)]
    pub shop_id: String,
    #[serde(default)]
    pub name: String,
    /// Free-form "street, city, country" as entered at registration.
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    /// The owning admin's user id.
    #[serde(default)]
    pub admin_id: String,
    #[serde(default)]
    pub latitude: f64,
    #[serde(default)]
    pub longitude: f64,
    #[serde(default)]
    pub status: ShopStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_lowercase() {
        let shop = Shop {
            shop_id: "s1".into(),
            status: ShopStatus::Active,
            ..Shop::default()
        };
        let value = serde_json::to_value(&shop).unwrap();
        assert_eq!(value["status"], "active");

        let back: Shop = serde_json::from_value(value).unwrap();
        assert_eq!(back.status, ShopStatus::Active);
    }
}
