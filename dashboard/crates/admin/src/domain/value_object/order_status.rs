//! Order Status Value Object
//!
//! The backend drives the order lifecycle; this layer only reads the status
//! and sorts it into the buckets the statistics use.
//!
//! ## Buckets
//! - **Active**: CREATED, STARTED, WAITING, ONGOING
//! - **Completed**: COMPLETED
//! - **Rejected**: REJECTED, REJECTED_BY_CLIENT, REJECTED_BY_DRIVER
//!
//! Codes outside the enumeration are kept as [`OrderStatus::Unrecognized`]
//! and fall in no bucket.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Created,
    Started,
    Waiting,
    Ongoing,
    Completed,
    Rejected,
    RejectedByClient,
    RejectedByDriver,
    /// Code sent by the backend that this build does not know
    Unrecognized(String),
}

/// Status group used by the dashboard statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusBucket {
    Active,
    Completed,
    Rejected,
}

impl OrderStatus {
    /// Every known status, in lifecycle order
    pub const KNOWN: [OrderStatus; 8] = [
        OrderStatus::Created,
        OrderStatus::Started,
        OrderStatus::Waiting,
        OrderStatus::Ongoing,
        OrderStatus::Completed,
        OrderStatus::Rejected,
        OrderStatus::RejectedByClient,
        OrderStatus::RejectedByDriver,
    ];

    /// Wire code
    pub fn code(&self) -> &str {
        use OrderStatus::*;
        match self {
            Created => "CREATED",
            Started => "STARTED",
            Waiting => "WAITING",
            Ongoing => "ONGOING",
            Completed => "COMPLETED",
            Rejected => "REJECTED",
            RejectedByClient => "REJECTED_BY_CLIENT",
            RejectedByDriver => "REJECTED_BY_DRIVER",
            Unrecognized(code) => code,
        }
    }

    /// Known status for a wire code
    pub fn from_code(code: &str) -> Option<Self> {
        use OrderStatus::*;
        match code {
            "CREATED" => Some(Created),
            "STARTED" => Some(Started),
            "WAITING" => Some(Waiting),
            "ONGOING" => Some(Ongoing),
            "COMPLETED" => Some(Completed),
            "REJECTED" => Some(Rejected),
            "REJECTED_BY_CLIENT" => Some(RejectedByClient),
            "REJECTED_BY_DRIVER" => Some(RejectedByDriver),
            _ => None,
        }
    }

    pub fn bucket(&self) -> Option<StatusBucket> {
        use OrderStatus::*;
        match self {
            Created | Started | Waiting | Ongoing => Some(StatusBucket::Active),
            Completed => Some(StatusBucket::Completed),
            Rejected | RejectedByClient | RejectedByDriver => Some(StatusBucket::Rejected),
            Unrecognized(_) => None,
        }
    }

    #[inline]
    pub fn is_completed(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    /// Human-readable label for exports and tables
    pub fn label(&self) -> &str {
        use OrderStatus::*;
        match self {
            Created => "Created",
            Started => "Started",
            Waiting => "Waiting",
            Ongoing => "Ongoing",
            Completed => "Completed",
            Rejected => "Rejected",
            RejectedByClient => "Rejected by client",
            RejectedByDriver => "Rejected by driver",
            Unrecognized(code) => code,
        }
    }
}

impl From<String> for OrderStatus {
    fn from(code: String) -> Self {
        OrderStatus::from_code(&code).unwrap_or(OrderStatus::Unrecognized(code))
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Unrecognized(code) => code,
            known => known.code().to_string(),
        }
    }
}

/// Strict parse; operator input must name a known status
impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase().replace('-', "_");
        OrderStatus::from_code(&code).ok_or_else(|| {
            format!(
                "unknown order status '{}' (expected one of {})",
                s,
                OrderStatus::KNOWN
                    .iter()
                    .map(|s| s.code())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
