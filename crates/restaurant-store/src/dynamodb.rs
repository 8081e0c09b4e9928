use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::types::AttributeValue;

use crate::{
    Count, DynamoDbConfig, RestaurantName, RestaurantStoreError, Result,
    store::{BackendKind, RestaurantStore},
};

/// Partition key of the restaurants table.
pub const KEY_ATTRIBUTE: &str = "name";
/// Attribute carrying the vote count.
pub const COUNT_ATTRIBUTE: &str = "restaurantcount";

/// DynamoDB-backed restaurant store.
///
/// Each lookup is a single `GetItem` point read keyed by restaurant name.
#[derive(Debug, Clone)]
pub struct DynamoDbRestaurantStore {
    client: Client,
    table: String,
}

impl DynamoDbRestaurantStore {
    /// Creates a store from an existing client.
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Builds a client bound to the configured region and endpoint.
    ///
    /// Credentials come from the default AWS provider chain and are resolved
    /// lazily on the first request.
    pub async fn connect(config: &DynamoDbConfig) -> Self {
        let sdk_config = load_sdk_config(config).await;

        tracing::debug!(
            table = %config.table,
            region = %config.region,
            endpoint_url = ?config.endpoint_url,
            "dynamodb client configured"
        );
        Self::new(Client::new(&sdk_config), config.table.clone())
    }

    /// Gets a reference to the underlying client.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}

async fn load_sdk_config(config: &DynamoDbConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(config.region.clone()));
    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }
    loader.load().await
}

fn get_item_error(table: &str, err: SdkError<GetItemError>) -> RestaurantStoreError {
    match &err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            RestaurantStoreError::ConnectionFailure(DisplayErrorContext(&err).to_string())
        }
        SdkError::ServiceError(context)
            if matches!(context.err(), GetItemError::ResourceNotFoundException(_)) =>
        {
            RestaurantStoreError::Configuration(format!("DynamoDB table '{table}' does not exist"))
        }
        _ => RestaurantStoreError::DynamoDb(DisplayErrorContext(&err).to_string()),
    }
}

/// Extracts the count from a returned item.
///
/// The count may be stored as a number or as numeric text.
fn item_to_count(name: &RestaurantName, item: &HashMap<String, AttributeValue>) -> Result<Count> {
    let invalid = |reason: String| RestaurantStoreError::InvalidValue {
        restaurant: name.clone(),
        reason,
    };

    let raw = match item.get(COUNT_ATTRIBUTE) {
        Some(AttributeValue::N(value)) | Some(AttributeValue::S(value)) => value,
        Some(other) => {
            return Err(invalid(format!(
                "{COUNT_ATTRIBUTE} has unsupported type {other:?}"
            )));
        }
        None => return Err(invalid(format!("item has no {COUNT_ATTRIBUTE} attribute"))),
    };

    raw.parse::<Count>().map_err(|_| {
        invalid(format!(
            "{COUNT_ATTRIBUTE} '{raw}' is not a non-negative integer"
        ))
    })
}

#[async_trait]
impl RestaurantStore for DynamoDbRestaurantStore {
    #[tracing::instrument(skip(self), fields(backend = "dynamodb", table = %self.table))]
    async fn read_count(&self, name: &RestaurantName) -> Result<Option<Count>> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(KEY_ATTRIBUTE, AttributeValue::S(name.as_str().to_string()))
            .send()
            .await
            .map_err(|e| get_item_error(&self.table, e))?;

        match output.item() {
            Some(item) => item_to_count(name, item).map(Some),
            None => {
                tracing::debug!("no restaurant item");
                Ok(None)
            }
        }
    }

    fn kind(&self) -> BackendKind {
        BackendKind::KeyValue
    }
}
