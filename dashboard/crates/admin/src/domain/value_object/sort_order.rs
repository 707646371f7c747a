use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sort direction for list endpoints (`_order`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "ASC")]
    #[display("ASC")]
    Asc,
    #[serde(rename = "DESC")]
    #[display("DESC")]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortOrder::Asc),
            "DESC" => Ok(SortOrder::Desc),
            _ => Err(format!("unknown sort order '{}' (expected ASC or DESC)", s)),
        }
    }
}
