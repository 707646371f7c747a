//! CSV Export
//!
//! Flattens users and orders into spreadsheet rows and renders them with
//! [`platform::csv`]. Timestamps are local time, `dd.MM.yyyy HH:mm`.

use chrono::{DateTime, Local, Utc};
use platform::csv::{csv_filename, export_to_csv};
use serde::Serialize;

use crate::application::client::AdminClient;
use crate::domain::entity::{Order, User};
use crate::domain::query::{OrderFilter, Pagination, UserFilter};
use crate::domain::transport::BackendTransport;
use crate::domain::value_object::UserKind;
use crate::error::AdminResult;

/// Rendered export ready to be written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub filename: String,
    pub content: String,
    pub rows: usize,
}

#[derive(Debug, Serialize)]
pub struct ClientExportRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "First name")]
    pub first_name: String,
    #[serde(rename = "Last name")]
    pub last_name: String,
    #[serde(rename = "Middle name")]
    pub middle_name: String,
    #[serde(rename = "Status")]
    pub status: &'static str,
    #[serde(rename = "Blocked until")]
    pub blocked_until: String,
    #[serde(rename = "Block reason")]
    pub block_reason: String,
    #[serde(rename = "Created at")]
    pub created_at: String,
    #[serde(rename = "Orders")]
    pub orders: usize,
}

#[derive(Debug, Serialize)]
pub struct DriverExportRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "First name")]
    pub first_name: String,
    #[serde(rename = "Last name")]
    pub last_name: String,
    #[serde(rename = "Middle name")]
    pub middle_name: String,
    #[serde(rename = "Status")]
    pub status: &'static str,
    #[serde(rename = "Blocked until")]
    pub blocked_until: String,
    #[serde(rename = "Block reason")]
    pub block_reason: String,
    #[serde(rename = "Created at")]
    pub created_at: String,
    #[serde(rename = "Orders")]
    pub orders: usize,
    #[serde(rename = "Completed orders")]
    pub completed_orders: usize,
    #[serde(rename = "License categories")]
    pub license_categories: String,
}

#[derive(Debug, Serialize)]
pub struct OrderExportRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Client ID")]
    pub client_id: String,
    #[serde(rename = "Driver ID")]
    pub driver_id: String,
    #[serde(rename = "Type")]
    pub order_type: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Created at")]
    pub created_at: String,
    #[serde(rename = "Start time")]
    pub start_time: String,
    #[serde(rename = "Arrival time")]
    pub arrival_time: String,
    #[serde(rename = "Latitude")]
    pub lat: Option<f64>,
    #[serde(rename = "Longitude")]
    pub lng: Option<f64>,
}

/// `dd.MM.yyyy HH:mm` in local time
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local)
        .format("%d.%m.%Y %H:%M")
        .to_string()
}

fn format_optional(at: Option<&DateTime<Utc>>) -> String {
    at.map(format_timestamp).unwrap_or_default()
}

fn status_label(user: &User) -> &'static str {
    if user.is_blocked { "Blocked" } else { "Active" }
}

impl From<&User> for ClientExportRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            phone: user.phone.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            middle_name: user.middle_name.clone().unwrap_or_default(),
            status: status_label(user),
            blocked_until: format_optional(user.blocked_until.as_ref()),
            block_reason: user.block_reason.clone().unwrap_or_default(),
            created_at: format_timestamp(&user.created_at),
            orders: user.client_order_count(),
        }
    }
}

impl From<&User> for DriverExportRow {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            phone: user.phone.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            middle_name: user.middle_name.clone().unwrap_or_default(),
            status: status_label(user),
            blocked_until: format_optional(user.blocked_until.as_ref()),
            block_reason: user.block_reason.clone().unwrap_or_default(),
            created_at: format_timestamp(&user.created_at),
            orders: user.driver_order_count(),
            completed_orders: user.completed_driver_orders(),
            license_categories: user.license_categories(),
        }
    }
}

impl From<&Order> for OrderExportRow {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.to_string(),
            client_id: order.client_id.to_string(),
            driver_id: order
                .driver_id
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            order_type: order.order_type.label().to_string(),
            status: order.order_status.label().to_string(),
            from: order.from.clone(),
            to: order.to.clone(),
            price: order.price,
            created_at: format_timestamp(&order.created_at),
            start_time: format_optional(order.start_time.as_ref()),
            arrival_time: format_optional(order.arrival_time.as_ref()),
            lat: order.lat,
            lng: order.lng,
        }
    }
}

/// Render users of `kind` as CSV text; `None` when there are no users
pub fn users_csv(kind: UserKind, users: &[User]) -> AdminResult<Option<String>> {
    let csv = match kind {
        UserKind::Client => {
            let rows: Vec<_> = users.iter().map(ClientExportRow::from).collect();
            export_to_csv(&rows)?
        }
        UserKind::Driver => {
            let rows: Vec<_> = users.iter().map(DriverExportRow::from).collect();
            export_to_csv(&rows)?
        }
    };
    Ok(csv)
}

pub fn orders_csv(orders: &[Order]) -> AdminResult<Option<String>> {
    let rows: Vec<_> = orders.iter().map(OrderExportRow::from).collect();
    Ok(export_to_csv(&rows)?)
}

fn export_window(page: &Pagination, limit: u32) -> Pagination {
    Pagination {
        start: Some(0),
        end: Some(limit),
        ..page.clone()
    }
}

impl<T: BackendTransport> AdminClient<T> {
    /// Fetch up to `export_limit` users matching `filter` and render them
    ///
    /// The filter's window is replaced; its sort is kept.
    pub async fn export_users(
        &self,
        kind: UserKind,
        filter: &UserFilter,
    ) -> AdminResult<Option<CsvExport>> {
        let page = export_window(&filter.page, self.config().export_limit);
        let filter = filter.clone().with_page(page);
        let users = self.get_users(kind, &filter).await?;

        let rows = users.len();
        let export = users_csv(kind, &users.data)?.map(|content| CsvExport {
            filename: csv_filename(kind.plural(), &self.now()),
            content,
            rows,
        });
        tracing::info!(kind = %kind, rows, "Users exported");
        Ok(export)
    }

    pub async fn export_orders(&self, filter: &OrderFilter) -> AdminResult<Option<CsvExport>> {
        let page = export_window(&filter.page, self.config().export_limit);
        let filter = filter.clone().with_page(page);
        let orders = self.get_orders(&filter).await?;

        let rows = orders.len();
        let export = orders_csv(&orders.data)?.map(|content| CsvExport {
            filename: csv_filename("orders", &self.now()),
            content,
            rows,
        });
        tracing::info!(rows, "Orders exported");
        Ok(export)
    }
}
