//! DynamoDB integration tests against DynamoDB Local.
//!
//! Run with:
//!
//! ```bash
//! cargo test -p restaurant-store --test dynamodb_integration
//! ```

mod support;

use aws_sdk_dynamodb::types::AttributeValue;
use restaurant_store::{
    BackendKind, DynamoDbRestaurantStore, RestaurantCountLookup, RestaurantStoreError,
};
use support::TABLE;

async fn key_value_lookup() -> RestaurantCountLookup {
    let info = support::dynamodb().await;
    RestaurantCountLookup::new(DynamoDbRestaurantStore::new(info.client(), TABLE))
}

#[tokio::test]
async fn number_attribute_count_as_text() {
    let info = support::dynamodb().await;
    support::put_item(&info.client(), "joes", AttributeValue::N("42".into())).await;

    let lookup = key_value_lookup().await;
    assert_eq!(lookup.backend_kind(), BackendKind::KeyValue);
    assert_eq!(lookup.lookup_count("joes").await.unwrap(), "42");
}

#[tokio::test]
async fn string_attribute_count_as_text() {
    let info = support::dynamodb().await;
    support::put_item(&info.client(), "tacos", AttributeValue::S("7".into())).await;

    let lookup = key_value_lookup().await;
    assert_eq!(lookup.lookup_count("tacos").await.unwrap(), "7");
}

#[tokio::test]
async fn missing_item_is_not_found() {
    let lookup = key_value_lookup().await;

    let result = lookup.lookup_count("nowhere").await;
    assert!(matches!(result, Err(RestaurantStoreError::NotFound(_))));
}

#[tokio::test]
async fn non_numeric_attribute_is_invalid() {
    let info = support::dynamodb().await;
    support::put_item(&info.client(), "mystery", AttributeValue::S("lots".into())).await;

    let lookup = key_value_lookup().await;
    let result = lookup.lookup_count("mystery").await;
    assert!(matches!(
        result,
        Err(RestaurantStoreError::InvalidValue { .. })
    ));
}

#[tokio::test]
async fn missing_table_is_configuration_error() {
    let info = support::dynamodb().await;
    let lookup =
        RestaurantCountLookup::new(DynamoDbRestaurantStore::new(info.client(), "no-such-table"));

    let result = lookup.lookup_count("joes").await;
    assert!(matches!(
        result,
        Err(RestaurantStoreError::Configuration(_))
    ));
}
