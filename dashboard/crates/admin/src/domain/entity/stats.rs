//! Dashboard Statistics
//!
//! Aggregate figures shown on the dashboard. Normally served by the backend;
//! [`StatsData::compute`] derives the same figures from raw lists.

use chrono::{DateTime, Local, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{order::Order, user::User};
use crate::domain::value_object::StatusBucket;

/// Aggregate statistics; the default is the all-zero result
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_drivers: u64,
    #[serde(default)]
    pub total_orders: u64,
    #[serde(default)]
    pub active_orders: u64,
    #[serde(default)]
    pub completed_orders: u64,
    #[serde(default)]
    pub rejected_orders: u64,
    #[serde(default)]
    pub today_orders: u64,
    #[serde(default)]
    pub revenue: f64,
}

impl StatsData {
    /// Compute statistics from full client, driver and order lists
    ///
    /// ## Arguments
    /// * `today_start` - Orders created at or after this instant count as today's
    ///
    /// Orders with an unrecognized status count toward `total_orders` only.
    pub fn compute(
        clients: &[User],
        drivers: &[User],
        orders: &[Order],
        today_start: DateTime<Utc>,
    ) -> Self {
        let mut stats = StatsData {
            total_users: clients.len() as u64,
            total_drivers: drivers.len() as u64,
            total_orders: orders.len() as u64,
            ..Default::default()
        };

        for order in orders {
            match order.order_status.bucket() {
                Some(StatusBucket::Active) => stats.active_orders += 1,
                Some(StatusBucket::Completed) => {
                    stats.completed_orders += 1;
                    stats.revenue += order.price;
                }
                Some(StatusBucket::Rejected) => stats.rejected_orders += 1,
                None => {}
            }
            if order.created_since(today_start) {
                stats.today_orders += 1;
            }
        }

        stats
    }

    /// Orders outside the three buckets
    pub fn other_orders(&self) -> u64 {
        let bucketed = self.active_orders + self.completed_orders + self.rejected_orders;
        self.total_orders.saturating_sub(bucketed)
    }
}

/// Local midnight of the calendar day containing `now`
///
/// Falls back to UTC midnight when local midnight does not exist
/// (a DST jump at 00:00).
pub fn local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let local_date = now.with_timezone(&Local).date_naive();
    let midnight = local_date.and_time(NaiveTime::MIN);

    midnight
        .and_local_timezone(Local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| midnight.and_utc())
}
