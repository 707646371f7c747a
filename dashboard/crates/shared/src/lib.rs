//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of the console's vocabulary:
//! - The error taxonomy every failure is classified into
//! - The unified application error carried up to the operator
//! - Typed identifiers for backend records
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all crates.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
