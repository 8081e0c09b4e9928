//! Restaurant vote count lookup.
//!
//! A [`RestaurantCountLookup`] reads the vote count of a single restaurant from
//! whichever backend the [`Config`] selects: PostgreSQL when no DynamoDB table
//! is configured, DynamoDB otherwise. Both backends sit behind the
//! [`RestaurantStore`] trait, together with an in-memory store for tests.

pub mod config;
pub mod dynamodb;
pub mod error;
pub mod lookup;
pub mod memory;
pub mod postgres;
pub mod store;

pub use common::{Count, RestaurantName};
pub use config::{Backend, Config, DynamoDbConfig, PostgresConfig, SslMode};
pub use dynamodb::DynamoDbRestaurantStore;
pub use error::{RestaurantStoreError, Result};
pub use lookup::RestaurantCountLookup;
pub use memory::InMemoryRestaurantStore;
pub use postgres::PostgresRestaurantStore;
pub use store::{BackendKind, RestaurantStore};
