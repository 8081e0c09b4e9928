use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Count, RestaurantName, Result,
    store::{BackendKind, RestaurantStore},
};

/// In-memory restaurant store for testing.
///
/// Provides the same interface as the PostgreSQL and DynamoDB stores.
#[derive(Clone, Default)]
pub struct InMemoryRestaurantStore {
    counts: Arc<RwLock<HashMap<RestaurantName, Count>>>,
}

impl InMemoryRestaurantStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the count for a restaurant, replacing any previous value.
    pub async fn insert(&self, name: RestaurantName, count: Count) {
        self.counts.write().await.insert(name, count);
    }

    /// Removes a restaurant, returning its count if it was present.
    pub async fn remove(&self, name: &RestaurantName) -> Option<Count> {
        self.counts.write().await.remove(name)
    }

    /// Returns the number of restaurants stored.
    pub async fn len(&self) -> usize {
        self.counts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.counts.read().await.is_empty()
    }

    /// Clears all restaurants.
    pub async fn clear(&self) {
        self.counts.write().await.clear();
    }
}

#[async_trait]
impl RestaurantStore for InMemoryRestaurantStore {
    async fn read_count(&self, name: &RestaurantName) -> Result<Option<Count>> {
        Ok(self.counts.read().await.get(name).copied())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::InMemory
    }
}
