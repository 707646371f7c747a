//! Order List Filter

use chrono::NaiveDate;
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::query::{Pagination, QueryPairs};
use crate::domain::value_object::{OrderStatus, OrderType, UserKind};
use crate::error::{AdminError, AdminResult};

/// Filter for `GET /admin/order-requests`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OrderFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_status: Option<OrderStatus>,
    /// Orders placed by this client
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<UserId>,
    /// Orders served by this driver
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_id: Option<UserId>,
    /// Created on or after this day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    /// Created on or before this day
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub page: Pagination,
}

impl OrderFilter {
    pub fn with_page(mut self, page: Pagination) -> Self {
        self.page = page;
        self
    }

    /// Restrict to orders of one user, seen in the given role
    pub fn for_user(mut self, user_id: &UserId, kind: UserKind) -> Self {
        match kind {
            UserKind::Client => self.client_id = Some(user_id.clone()),
            UserKind::Driver => self.driver_id = Some(user_id.clone()),
        }
        self
    }

    pub fn validate(&self) -> AdminResult<()> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && from > to
        {
            return Err(AdminError::InvalidInput(
                "dateFrom must not be after dateTo".to_string(),
            ));
        }
        for price in [self.min_price, self.max_price].into_iter().flatten() {
            if !price.is_finite() || price < 0.0 {
                return Err(AdminError::InvalidInput(format!(
                    "Price bound {} is not a non-negative number",
                    price
                )));
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price)
            && min > max
        {
            return Err(AdminError::InvalidInput(
                "minPrice must not exceed maxPrice".to_string(),
            ));
        }
        Ok(())
    }

    /// Query pairs in wire order, pagination last
    pub fn to_query(&self) -> QueryPairs {
        let mut pairs = QueryPairs::new();

        if let Some(kind) = &self.order_type {
            pairs.push(("orderType", kind.code().to_string()));
        }
        if let Some(status) = &self.order_status {
            pairs.push(("orderStatus", status.code().to_string()));
        }
        if let Some(client_id) = &self.client_id {
            pairs.push(("clientId", client_id.to_string()));
        }
        if let Some(driver_id) = &self.driver_id {
            pairs.push(("driverId", driver_id.to_string()));
        }
        if let Some(date_from) = self.date_from {
            pairs.push(("dateFrom", date_from.format("%Y-%m-%d").to_string()));
        }
        if let Some(date_to) = self.date_to {
            pairs.push(("dateTo", date_to.format("%Y-%m-%d").to_string()));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.to_string()));
        }
        self.page.append_to(&mut pairs);

        pairs
    }
}
