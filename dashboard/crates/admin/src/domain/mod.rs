//! Domain Layer
//!
//! Contains entities, value objects, query filters and the transport port.

pub mod entity;
pub mod query;
pub mod transport;
pub mod value_object;

// Re-exports
pub use entity::{BlockRequest, CategoryLicense, Order, Page, StatsData, User};
pub use query::{OrderFilter, Pagination, UserFilter};
pub use transport::{ApiRequest, ApiResponse, BackendTransport};
