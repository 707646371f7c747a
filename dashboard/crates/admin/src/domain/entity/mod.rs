//! Entity Module

pub mod block;
pub mod order;
pub mod page;
pub mod stats;
pub mod user;

pub use block::BlockRequest;
pub use order::Order;
pub use page::Page;
pub use stats::StatsData;
pub use user::{CategoryLicense, User};
