//! Order Type Value Object

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Service category of an order (also the category of a driver license)
///
/// Unknown codes deserialize to [`OrderType::Unrecognized`] so one new
/// category does not break a whole list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderType {
    Taxi,
    Delivery,
    IntercityTaxi,
    Cargo,
    Unrecognized(String),
}

impl OrderType {
    pub const KNOWN: [OrderType; 4] = [
        OrderType::Taxi,
        OrderType::Delivery,
        OrderType::IntercityTaxi,
        OrderType::Cargo,
    ];

    pub fn code(&self) -> &str {
        match self {
            OrderType::Taxi => "TAXI",
            OrderType::Delivery => "DELIVERY",
            OrderType::IntercityTaxi => "INTERCITY_TAXI",
            OrderType::Cargo => "CARGO",
            OrderType::Unrecognized(code) => code,
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "TAXI" => Some(OrderType::Taxi),
            "DELIVERY" => Some(OrderType::Delivery),
            "INTERCITY_TAXI" => Some(OrderType::IntercityTaxi),
            "CARGO" => Some(OrderType::Cargo),
            _ => None,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            OrderType::Taxi => "Taxi",
            OrderType::Delivery => "Delivery",
            OrderType::IntercityTaxi => "Intercity taxi",
            OrderType::Cargo => "Cargo",
            OrderType::Unrecognized(code) => code,
        }
    }
}

impl From<String> for OrderType {
    fn from(code: String) -> Self {
        OrderType::from_code(&code).unwrap_or(OrderType::Unrecognized(code))
    }
}

impl From<OrderType> for String {
    fn from(kind: OrderType) -> Self {
        match kind {
            OrderType::Unrecognized(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl FromStr for OrderType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase().replace('-', "_");
        OrderType::from_code(&code).ok_or_else(|| {
            format!(
                "unknown order type '{}' (expected one of {})",
                s,
                OrderType::KNOWN
                    .iter()
                    .map(|t| t.code())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
