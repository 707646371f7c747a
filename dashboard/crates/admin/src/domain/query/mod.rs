//! Query Configuration
//!
//! Typed filters for the list endpoints. Each filter renders to ordered
//! `(wire name, value)` pairs; the same rendering forms the cache key, so
//! two equal filters always share an entry.

pub mod order_filter;
pub mod pagination;
pub mod user_filter;

pub use order_filter::OrderFilter;
pub use pagination::Pagination;
pub use user_filter::UserFilter;

/// Ordered query parameters
pub type QueryPairs = Vec<(&'static str, String)>;

/// Render pairs as `k=v&k=v`
///
/// `%`, `&`, `=` and `#` inside values are percent-encoded so distinct
/// filters never render the same string.
pub fn render_query(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, encode_value(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '%' => out.push_str("%25"),
            '&' => out.push_str("%26"),
            '=' => out.push_str("%3D"),
            '#' => out.push_str("%23"),
            _ => out.push(c),
        }
    }
    out
}
