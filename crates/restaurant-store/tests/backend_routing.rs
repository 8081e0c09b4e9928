//! Backend selection against live PostgreSQL and DynamoDB Local.
//!
//! The same restaurant holds a different count in each store, so the
//! returned value shows which backend served the lookup.

mod support;

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use restaurant_store::{
    Backend, BackendKind, Config, DynamoDbRestaurantStore, RestaurantCountLookup,
};

async fn lookup_for(config: &Config) -> RestaurantCountLookup {
    match &config.backend {
        Backend::Relational(_) => RestaurantCountLookup::from_config(config).await,
        // DynamoDB Local needs static credentials, so the client is built here.
        Backend::KeyValue(ddb) => {
            let info = support::dynamodb().await;
            RestaurantCountLookup::new(DynamoDbRestaurantStore::new(
                info.client(),
                ddb.table.clone(),
            ))
        }
    }
}

#[tokio::test]
async fn table_setting_toggles_backend() {
    let pg = support::postgres().await;
    let ddb = support::dynamodb().await;

    let pool = support::admin_pool(&pg).await;
    support::upsert_row(&pool, "routed", Some(42)).await;
    support::put_item(&ddb.client(), "routed", AttributeValue::N("17".into())).await;

    let port = pg.port.to_string();
    let mut vars = HashMap::from([
        ("YELB_DB_SERVER_ENDPOINT", pg.host.as_str()),
        ("YELB_DB_SERVER_PORT", port.as_str()),
        ("YELB_DB_NAME", "postgres"),
        ("YELB_DB_USERNAME", "postgres"),
        ("YELB_DB_PASSWORD", "postgres"),
        ("YELB_DB_SSL_MODE", "disable"),
        ("AWS_REGION", "us-east-1"),
        ("YELB_DDB_ENDPOINT_URL", ddb.endpoint_url.as_str()),
    ]);

    let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
    let lookup = lookup_for(&config).await;
    assert_eq!(lookup.backend_kind(), BackendKind::Relational);
    assert_eq!(lookup.lookup_count("routed").await.unwrap(), "42");

    vars.insert("YELB_DDB_RESTAURANTS", support::TABLE);
    let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
    let lookup = lookup_for(&config).await;
    assert_eq!(lookup.backend_kind(), BackendKind::KeyValue);
    assert_eq!(lookup.lookup_count("routed").await.unwrap(), "17");

    vars.insert("YELB_DDB_RESTAURANTS", "");
    let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string())).unwrap();
    let lookup = lookup_for(&config).await;
    assert_eq!(lookup.lookup_count("routed").await.unwrap(), "42");
}
