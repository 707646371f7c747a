//! Application Layer
//!
//! The admin client, its configuration, session state and CSV exports.

pub mod client;
pub mod config;
pub mod export;
pub mod session;

pub use client::AdminClient;
pub use config::{AdminConfig, CacheTtl};
pub use export::CsvExport;
pub use session::SessionState;
