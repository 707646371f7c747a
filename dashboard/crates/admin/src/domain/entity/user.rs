//! User Entity
//!
//! A client or driver account. Only the backend mutates users; this layer
//! reads them and issues block/unblock commands.

use chrono::{DateTime, Utc};
use kernel::id::{LicenseId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::order::Order;
use crate::domain::value_object::OrderType;

/// User record as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub phone: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sms: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_token: Option<String>,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blocked_until: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Orders placed as a client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<Vec<Order>>,
    /// Orders served as a driver
    #[serde(
        default,
        rename = "orders_as_driver",
        skip_serializing_if = "Option::is_none"
    )]
    pub orders_as_driver: Option<Vec<Order>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_licenses: Option<Vec<CategoryLicense>>,
}

/// Vehicle license a driver holds for one order category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLicense {
    pub id: LicenseId,
    pub driver_id: UserId,
    pub category_type: OrderType,
    #[serde(default)]
    pub brand: String,
    #[serde(default)]
    pub model: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub color: String,
    #[serde(rename = "SSN", default)]
    pub ssn: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// "First Middle Last", skipping empty parts
    pub fn full_name(&self) -> String {
        [
            self.first_name.as_str(),
            self.middle_name.as_deref().unwrap_or(""),
            self.last_name.as_str(),
        ]
        .iter()
        .filter(|part| !part.trim().is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ")
    }

    /// Blocked as of `now`
    ///
    /// A block whose expiry has passed no longer counts, even before the
    /// backend's release job clears the flag.
    pub fn is_blocked_at(&self, now: DateTime<Utc>) -> bool {
        match (self.is_blocked, self.blocked_until) {
            (false, _) => false,
            (true, None) => true,
            (true, Some(until)) => until > now,
        }
    }

    pub fn client_order_count(&self) -> usize {
        self.orders.as_ref().map_or(0, Vec::len)
    }

    pub fn driver_order_count(&self) -> usize {
        self.orders_as_driver.as_ref().map_or(0, Vec::len)
    }

    pub fn completed_driver_orders(&self) -> usize {
        let orders = self.orders_as_driver.as_deref().unwrap_or_default();
        orders.iter().filter(|o| o.is_completed()).count()
    }

    /// License categories joined with ", "
    pub fn license_categories(&self) -> String {
        self.category_licenses
            .as_ref()
            .map(|licenses| {
                licenses
                    .iter()
                    .map(|l| l.category_type.code())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .unwrap_or_default()
    }
}
