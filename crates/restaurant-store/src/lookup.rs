//! Backend-agnostic restaurant count lookup.

use std::sync::Arc;

use crate::{
    Backend, Config, Count, DynamoDbRestaurantStore, PostgresRestaurantStore, RestaurantName,
    RestaurantStoreError, Result,
    store::{BackendKind, RestaurantStore},
};

/// Looks up restaurant vote counts from the backend chosen at construction.
///
/// Absent restaurants are reported as [`RestaurantStoreError::NotFound`] on
/// every backend; a lookup never returns an empty count.
#[derive(Clone)]
pub struct RestaurantCountLookup {
    store: Arc<dyn RestaurantStore>,
}

impl RestaurantCountLookup {
    /// Wraps an existing store.
    pub fn new<S: RestaurantStore + 'static>(store: S) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Builds the store for the selected backend.
    ///
    /// Nothing is dialled here: PostgreSQL connects per lookup and the
    /// DynamoDB client resolves credentials on its first request.
    pub async fn connect(backend: &Backend) -> Self {
        match backend {
            Backend::Relational(config) => {
                tracing::info!(
                    host = %config.host,
                    port = config.port,
                    database = %config.database,
                    ssl_mode = %config.ssl_mode,
                    "using postgres backend"
                );
                Self::new(PostgresRestaurantStore::new(config))
            }
            Backend::KeyValue(config) => {
                tracing::info!(
                    table = %config.table,
                    region = %config.region,
                    "using dynamodb backend"
                );
                Self::new(DynamoDbRestaurantStore::connect(config).await)
            }
        }
    }

    /// Builds the lookup described by a configuration.
    pub async fn from_config(config: &Config) -> Self {
        Self::connect(&config.backend).await
    }

    /// Reports which backend lookups are routed to.
    pub fn backend_kind(&self) -> BackendKind {
        self.store.kind()
    }

    /// Returns the vote count of a restaurant as decimal text.
    pub async fn lookup_count(&self, restaurant: &str) -> Result<String> {
        let name = RestaurantName::new(restaurant)?;
        Ok(self.lookup(&name).await?.to_string())
    }

    /// Returns the vote count of a restaurant.
    #[tracing::instrument(skip(self), fields(backend = %self.store.kind()))]
    pub async fn lookup(&self, name: &RestaurantName) -> Result<Count> {
        match self.store.read_count(name).await {
            Ok(Some(count)) => {
                tracing::debug!(%count, "restaurant count read");
                Ok(count)
            }
            Ok(None) => Err(RestaurantStoreError::NotFound(name.clone())),
            Err(e) => {
                tracing::warn!(error = %e, "restaurant count lookup failed");
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for RestaurantCountLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestaurantCountLookup")
            .field("backend", &self.store.kind())
            .finish()
    }
}
