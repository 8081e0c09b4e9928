//! Shared value types for the restaurant count lookup.

pub mod types;

pub use types::{Count, InvalidRestaurantName, RestaurantName};
