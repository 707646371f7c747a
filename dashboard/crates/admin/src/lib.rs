//! Admin Dashboard Access Layer
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, query filters, transport port
//! - `application/` - The admin client, session state, exports
//! - `infra/` - reqwest transport, wire DTOs, endpoint paths
//!
//! ## Features
//! - SMS code sign-in with a persisted bearer token
//! - Filtered, paginated reads of clients, drivers and orders
//! - Block/unblock commands with cache invalidation
//! - Dashboard statistics with a locally computed fallback
//! - CSV export of filtered lists
//!
//! ## Session Model
//! - The token is attached to every protected request
//! - A 401 is retried once per route; a second 401 ends the session
//! - Signing in or out clears every cached response

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::client::AdminClient;
pub use application::config::{AdminConfig, CacheTtl};
pub use application::export::CsvExport;
pub use application::session::SessionState;
pub use error::{AdminError, AdminResult};
pub use infra::http::ReqwestTransport;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::query::*;
    pub use crate::domain::value_object::*;
    pub use crate::infra::dto::ActionResponse;
}

pub mod transport {
    pub use crate::domain::transport::*;
}
