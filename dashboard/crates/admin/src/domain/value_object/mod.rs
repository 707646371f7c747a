//! Value Object Module

pub mod block_duration;
pub mod order_status;
pub mod order_type;
pub mod sort_order;
pub mod user_kind;

pub use block_duration::{BlockDuration, BlockDurationError, DurationPreset, TimeUnit};
pub use order_status::{OrderStatus, StatusBucket};
pub use order_type::OrderType;
pub use sort_order::SortOrder;
pub use user_kind::UserKind;
