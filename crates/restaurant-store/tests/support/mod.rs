//! Shared container setup for the integration tests.
//!
//! Each backend gets one container per test binary, started on first use.

#![allow(dead_code)]

use std::sync::Arc;

use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::{BehaviorVersion, Credentials, Region};
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use restaurant_store::{PostgresConfig, SslMode};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::dynamodb_local::DynamoDb;
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Database without a `restaurants` table, used to make lookups fail.
pub const EMPTY_DATABASE: &str = "yelb_empty";
pub const TABLE: &str = "yelb-restaurants";

pub struct PostgresInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    pub host: String,
    pub port: u16,
}

impl PostgresInfo {
    pub fn connection_string(&self, database: &str) -> String {
        format!(
            "postgres://postgres:postgres@{}:{}/{}",
            self.host, self.port, database
        )
    }

    /// Lookup configuration pointing at the container. The test image has no TLS.
    pub fn config(&self, database: &str) -> PostgresConfig {
        PostgresConfig {
            host: self.host.clone(),
            port: self.port,
            database: database.to_string(),
            username: "postgres".to_string(),
            password: Some("postgres".to_string()),
            ssl_mode: SslMode::Disable,
            ssl_root_cert: None,
        }
    }
}

static POSTGRES: OnceCell<Arc<PostgresInfo>> = OnceCell::const_new();

pub async fn postgres() -> Arc<PostgresInfo> {
    POSTGRES
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap().to_string();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let info = PostgresInfo {
                container,
                host,
                port,
            };

            let pool = PgPool::connect(&info.connection_string("postgres"))
                .await
                .unwrap();
            sqlx::raw_sql(include_str!("../fixtures/restaurants.sql"))
                .execute(&pool)
                .await
                .unwrap();
            sqlx::query(&format!("CREATE DATABASE {EMPTY_DATABASE}"))
                .execute(&pool)
                .await
                .unwrap();
            pool.close().await;

            Arc::new(info)
        })
        .await
        .clone()
}

/// Pool for seeding and inspecting the database directly.
pub async fn admin_pool(info: &PostgresInfo) -> PgPool {
    sqlx::postgres::PgPoolOptions::new()
        .max_connections(2)
        .connect(&info.connection_string("postgres"))
        .await
        .unwrap()
}

pub async fn upsert_row(pool: &PgPool, name: &str, count: Option<i32>) {
    sqlx::query(
        r#"
        INSERT INTO restaurants (name, count) VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET count = EXCLUDED.count
        "#,
    )
    .bind(name)
    .bind(count)
    .execute(pool)
    .await
    .unwrap();
}

pub struct DynamoDbInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<DynamoDb>,
    pub endpoint_url: String,
}

impl DynamoDbInfo {
    /// Client with static credentials; DynamoDB Local accepts any.
    pub fn client(&self) -> Client {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("us-east-1"))
            .endpoint_url(&self.endpoint_url)
            .credentials_provider(Credentials::new("local", "local", None, None, "tests"))
            .build();
        Client::from_conf(config)
    }
}

static DYNAMODB: OnceCell<Arc<DynamoDbInfo>> = OnceCell::const_new();

pub async fn dynamodb() -> Arc<DynamoDbInfo> {
    DYNAMODB
        .get_or_init(|| async {
            let container = DynamoDb::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(8000).await.unwrap();

            let info = DynamoDbInfo {
                container,
                endpoint_url: format!("http://{host}:{port}"),
            };

            info.client()
                .create_table()
                .table_name(TABLE)
                .attribute_definitions(
                    AttributeDefinition::builder()
                        .attribute_name("name")
                        .attribute_type(ScalarAttributeType::S)
                        .build()
                        .unwrap(),
                )
                .key_schema(
                    KeySchemaElement::builder()
                        .attribute_name("name")
                        .key_type(KeyType::Hash)
                        .build()
                        .unwrap(),
                )
                .billing_mode(BillingMode::PayPerRequest)
                .send()
                .await
                .unwrap();

            Arc::new(info)
        })
        .await
        .clone()
}

pub async fn put_item(client: &Client, name: &str, count: AttributeValue) {
    client
        .put_item()
        .table_name(TABLE)
        .item("name", AttributeValue::S(name.to_string()))
        .item("restaurantcount", count)
        .send()
        .await
        .unwrap();
}
