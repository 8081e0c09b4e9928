pub mod health;
pub mod host;
pub mod restaurants;
