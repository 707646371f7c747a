//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Time source abstraction (system and manual clocks)
//! - TTL response cache behind a swappable interface
//! - Durable session-token storage
//! - HTTP header helpers (bearer credentials, total-count header)
//! - CSV export
//! - Environment configuration helpers

pub mod cache;
pub mod clock;
pub mod config;
pub mod csv;
pub mod header;
pub mod token_store;
