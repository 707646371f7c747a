use serde::{Deserialize, Serialize};

use crate::domain::query::QueryPairs;
use crate::domain::value_object::SortOrder;

/// Offset window and sort for list endpoints
///
/// `_start` is the first row (inclusive) and `_end` the last (exclusive).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pagination {
    #[serde(rename = "_start", default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u32>,
    #[serde(rename = "_end", default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u32>,
    /// Field to sort by (wire name, e.g. `createdAt`)
    #[serde(rename = "_sort", default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(rename = "_order", default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
}

impl Pagination {
    /// Window `[start, end)`
    pub fn window(start: u32, end: u32) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
            ..Default::default()
        }
    }

    /// Page `page` (zero-based) of `size` rows
    pub fn page(page: u32, size: u32) -> Self {
        let start = page.saturating_mul(size);
        Self::window(start, start.saturating_add(size))
    }

    pub fn sorted_by(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort = Some(field.into());
        self.order = Some(order);
        self
    }

    pub(crate) fn append_to(&self, pairs: &mut QueryPairs) {
        if let Some(start) = self.start {
            pairs.push(("_start", start.to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("_end", end.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("_sort", sort.clone()));
        }
        if let Some(order) = self.order {
            pairs.push(("_order", order.to_string()));
        }
    }
}
