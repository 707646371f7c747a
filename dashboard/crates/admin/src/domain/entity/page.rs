use serde::{Deserialize, Serialize};

/// One page of a list endpoint
///
/// `total` is the unpaginated row count from the `x-total-count` header.
/// When the backend omits the header, `total` is 0 and `total_known` is
/// false.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: u64,
    pub total_known: bool,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total: Option<u64>) -> Self {
        Self {
            data,
            total: total.unwrap_or(0),
            total_known: total.is_some(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
