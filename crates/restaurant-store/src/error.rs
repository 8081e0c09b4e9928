use thiserror::Error;

use crate::RestaurantName;

/// Errors that can occur when looking up a restaurant's vote count.
#[derive(Debug, Error)]
pub enum RestaurantStoreError {
    /// No row or item exists for the restaurant.
    #[error("Restaurant not found: {0}")]
    NotFound(RestaurantName),

    /// The backend could not be reached.
    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    /// Connection parameters are missing or invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The requested restaurant name is not a valid lookup key.
    #[error("Invalid restaurant name: {0}")]
    InvalidName(#[from] common::InvalidRestaurantName),

    /// The stored count is not a non-negative integer.
    #[error("Invalid count stored for {restaurant}: {reason}")]
    InvalidValue {
        restaurant: RestaurantName,
        reason: String,
    },

    /// A query failed after the connection was established.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// DynamoDB rejected the request.
    #[error("DynamoDB error: {0}")]
    DynamoDb(String),
}

impl RestaurantStoreError {
    /// Returns true for errors caused by the backend being unreachable.
    pub fn is_connection_failure(&self) -> bool {
        matches!(self, Self::ConnectionFailure(_))
    }
}

/// Result type for restaurant store operations.
pub type Result<T> = std::result::Result<T, RestaurantStoreError>;
