//! DynamoDB store backend.
//!
//! One table, string partition key `pk`, record body as a JSON document in
//! the string attribute `doc`. Keeping the body opaque to DynamoDB means
//! the attribute schema never changes when domain types do.
//!
//! Prefix scans use `begins_with` with full `LastEvaluatedKey` pagination,
//! which is O(table) - acceptable at catalog scale, and confined behind
//! the [`ItemStore`] seam.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, KeySchemaElement, KeyType,
    ScalarAttributeType,
};
use serde_json::Value;

use crate::adapter::ItemStore;
use crate::error::StoreError;

/// Partition key attribute name.
pub const PK_ATTRIBUTE: &str = "pk";
/// Document body attribute name.
pub const DOC_ATTRIBUTE: &str = "doc";

/// DynamoDB [`ItemStore`] backend.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table: String,
}

impl DynamoStore {
    /// Create a backend for `table`.
    #[must_use]
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    /// Create a backend from the standard AWS SDK environment (region,
    /// credentials, instance roles). `endpoint_url` overrides the endpoint
    /// for DynamoDB Local.
    pub async fn from_env(table: impl Into<String>, endpoint_url: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), table)
    }

    /// The table this backend writes to.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Provision the table: string partition key `pk`, on-demand billing.
    ///
    /// Returns `false` when the table already exists.
    ///
    /// # Errors
    ///
    /// Returns an error when table creation fails for any reason other
    /// than the table already existing.
    pub async fn create_table(&self) -> Result<bool, StoreError> {
        let pk_definition = AttributeDefinition::builder()
            .attribute_name(PK_ATTRIBUTE)
            .attribute_type(ScalarAttributeType::S)
            .build()
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let pk_schema = KeySchemaElement::builder()
            .attribute_name(PK_ATTRIBUTE)
            .key_type(KeyType::Hash)
            .build()
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let result = self
            .client
            .create_table()
            .table_name(&self.table)
            .attribute_definitions(pk_definition)
            .key_schema(pk_schema)
            .billing_mode(BillingMode::PayPerRequest)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e)
                if e.as_service_error()
                    .is_some_and(CreateTableError::is_resource_in_use_exception) =>
            {
                Ok(false)
            }
            Err(e) => Err(StoreError::Backend(DisplayErrorContext(&e).to_string())),
        }
    }
}

/// Pull the JSON document out of a raw DynamoDB item.
fn decode_doc(key: &str, item: &HashMap<String, AttributeValue>) -> Result<Value, StoreError> {
    let attr = item
        .get(DOC_ATTRIBUTE)
        .ok_or_else(|| StoreError::Corrupt(format!("{key}: missing `{DOC_ATTRIBUTE}` attribute")))?;
    let body = attr.as_s().map_err(|_| {
        StoreError::Corrupt(format!("{key}: `{DOC_ATTRIBUTE}` attribute is not a string"))
    })?;
    serde_json::from_str(body).map_err(|e| StoreError::Corrupt(format!("{key}: {e}")))
}

/// Read the partition key back out of a scanned item, for error context.
fn item_key(item: &HashMap<String, AttributeValue>) -> &str {
    item.get(PK_ATTRIBUTE)
        .and_then(|attr| attr.as_s().ok())
        .map_or("<unknown>", String::as_str)
}

#[async_trait]
impl ItemStore for DynamoStore {
    async fn put(&self, key: &str, record: Value) -> Result<(), StoreError> {
        let body = serde_json::to_string(&record)?;
        self.client
            .put_item()
            .table_name(&self.table)
            .item(PK_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .item(DOC_ATTRIBUTE, AttributeValue::S(body))
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table)
            .key(PK_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;

        match output.item {
            Some(item) => decode_doc(key, &item).map(Some),
            None => Ok(None),
        }
    }

    async fn scan(&self, prefix: &str) -> Result<Vec<Value>, StoreError> {
        let mut docs = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table)
                .filter_expression("begins_with(#pk, :prefix)")
                .expression_attribute_names("#pk", PK_ATTRIBUTE)
                .expression_attribute_values(":prefix", AttributeValue::S(prefix.to_owned()))
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;

            for item in output.items.unwrap_or_default() {
                docs.push(decode_doc(item_key(&item), &item)?);
            }

            match output.last_evaluated_key {
                Some(key) => start_key = Some(key),
                None => break,
            }
        }

        Ok(docs)
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.client
            .delete_item()
            .table_name(&self.table)
            .key(PK_ATTRIBUTE, AttributeValue::S(key.to_owned()))
            .send()
            .await
            .map_err(|e| StoreError::Backend(DisplayErrorContext(&e).to_string()))?;
        Ok(())
    }
}
