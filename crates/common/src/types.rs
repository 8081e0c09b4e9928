use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Returned when a restaurant name fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Restaurant name must not be empty")]
pub struct InvalidRestaurantName;

/// Name of a restaurant, used as the exact lookup key in every backend.
///
/// Guaranteed non-empty. The value is kept verbatim (no trimming or case
/// folding) because both backends match on the exact string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RestaurantName(String);

impl RestaurantName {
    /// Validates and wraps a restaurant name.
    pub fn new(name: impl Into<String>) -> Result<Self, InvalidRestaurantName> {
        let name = name.into();
        if name.is_empty() {
            return Err(InvalidRestaurantName);
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RestaurantName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RestaurantName {
    type Error = InvalidRestaurantName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RestaurantName {
    type Error = InvalidRestaurantName;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RestaurantName> for String {
    fn from(name: RestaurantName) -> Self {
        name.0
    }
}

impl AsRef<str> for RestaurantName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Number of votes recorded for a restaurant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Count(u64);

impl Count {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for Count {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Count {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Count> for u64 {
    fn from(count: Count) -> Self {
        count.0
    }
}

impl TryFrom<i64> for Count {
    type Error = std::num::TryFromIntError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value).map(Self)
    }
}

impl std::str::FromStr for Count {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(Self)
    }
}
