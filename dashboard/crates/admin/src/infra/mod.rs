//! Infrastructure Layer
//!
//! The reqwest transport, wire DTOs and endpoint paths.

pub mod dto;
pub mod endpoints;
pub mod http;

pub use self::http::ReqwestTransport;
