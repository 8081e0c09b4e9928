use async_trait::async_trait;

use crate::{Count, RestaurantName, Result};

/// Which kind of storage a store reads from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Relational,
    KeyValue,
    InMemory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Relational => write!(f, "postgres"),
            BackendKind::KeyValue => write!(f, "dynamodb"),
            BackendKind::InMemory => write!(f, "memory"),
        }
    }
}

/// Core trait for restaurant count stores.
///
/// Stores are read-only. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Reads the vote count recorded for a restaurant.
    ///
    /// Returns None if no row or item matches the name exactly.
    async fn read_count(&self, name: &RestaurantName) -> Result<Option<Count>>;

    /// Reports the kind of backend this store reads from.
    fn kind(&self) -> BackendKind;
}
