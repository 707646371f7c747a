//! Client/Driver List Filter

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::query::{Pagination, QueryPairs};
use crate::domain::value_object::{OrderStatus, OrderType};
use crate::error::{AdminError, AdminResult};

/// Filter for `GET /admin/clients` and `GET /admin/drivers`
///
/// Every field is optional; unset fields are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserFilter {
    /// Phone number substring
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Only blocked (`true`) or only unblocked (`false`) accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_blocked: Option<bool>,
    /// Users having at least one order in this status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    /// Users having at least one order of this type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    /// Registered on or after this day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    /// Registered on or before this day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_orders: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_orders: Option<u32>,
    #[serde(default)]
    pub page: Pagination,
}

impl UserFilter {
    pub fn with_page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    /// Reject contradictory ranges before a request is made
    pub fn validate(&self) -> AdminResult<()> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && from > to
        {
            return Err(AdminError::InvalidInput(
                "dateFrom must not be after dateTo".to_string(),
            ));
        }
        if let (Some(min), Some(max)) = (self.min_orders, self.max_orders)
            && min > max
        {
            return Err(AdminError::InvalidInput(
                "minOrders must not exceed maxOrders".to_string(),
            ));
        }
        Ok(())
    }

    /// Query pairs in wire order, pagination last
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();

        if let Some(phone) = &self.phone {
            pairs.push(("phone", phone.clone()));
        }
        if let Some(first_name) = &self.first_name {
            pairs.push(("firstName", first_name.clone()));
        }
        if let Some(last_name) = &self.last_name {
            pairs.push(("lastName", last_name.clone()));
        }
        if let Some(is_blocked) = self.is_blocked {
            pairs.push(("isBlocked", is_blocked.to_string()));
        }
        if let Some(status) = &self.order_status {
            pairs.push(("orderStatus", status.code().to_string()));
        }
        if let Some(kind) = &self.order_type {
            pairs.push(("orderType", kind.code().to_string()));
        }
        if let Some(date_from) = self.date_from {
            pairs.push(("dateFrom", date_from.format("%Y-%m-%d").to_string()));
        }
        if let Some(date_to) = self.date_to {
            pairs.push(("dateTo", date_to.format("%Y-%m-%d").to_string()));
        }
        if let Some(min) = self.min_orders {
            pairs.push(("minOrders", min.to_string()));
        }
        if let Some(max) = self.max_orders {
            pairs.push(("maxOrders", max.to_string()));
        }
        self.page.append_to(&mut pairs);

        pairs
    }
}
