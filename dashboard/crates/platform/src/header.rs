//! HTTP header utilities
//!
//! Building the outgoing bearer header and reading the list count header.

use http::{HeaderMap, HeaderValue};

/// Header carrying the unpaginated row count of list responses
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Error when building a header value
#[derive(Debug, Clone, thiserror::Error)]
pub enum HeaderError {
    #[error("Token contains characters not allowed in a header")]
    InvalidToken,
}

/// Build the `Authorization` header value for a bearer token
///
/// The value is marked sensitive so it is redacted from debug output.
pub fn bearer_value(token: &str) -> Result<HeaderValue, HeaderError> {
    let mut value = HeaderValue::from_str(&format!("Bearer {}", token))
        .map_err(|_| HeaderError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}

/// Read the total row count header
///
/// ## Returns
/// * `Some(count)` - Header present and numeric
/// * `None` - Header missing or unparsable
pub fn total_count(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(TOTAL_COUNT_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
