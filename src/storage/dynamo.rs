//! DynamoDB store implementation.
//!
//! Backs the Lambda deployment. The table holds one snapshot keyed by the
//! synthetic record id; replacement scans the key set, deletes in
//! batch-write groups, then inserts item by item.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::{AttributeValue, DeleteRequest, WriteRequest};

use crate::error::{AppError, Result};
use crate::models::EarthquakeRecord;
use crate::storage::SnapshotStore;

/// DynamoDB-backed snapshot store.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
}

impl DynamoStore {
    /// Create a new store for the given table.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Create a store from the ambient AWS environment.
    pub async fn from_env(table_name: impl Into<String>) -> Self {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&config), table_name)
    }

    fn to_item(record: &EarthquakeRecord) -> HashMap<String, AttributeValue> {
        let mut item = HashMap::new();
        item.insert("id".to_string(), AttributeValue::S(record.id.clone()));
        item.insert(
            "sequence_number".to_string(),
            AttributeValue::N(record.sequence_number.to_string()),
        );
        item.insert(
            "local_datetime".to_string(),
            AttributeValue::S(record.local_datetime.clone()),
        );
        item.insert(
            "utc_datetime".to_string(),
            AttributeValue::S(record.utc_datetime.clone()),
        );
        item.insert(
            "magnitude".to_string(),
            AttributeValue::S(record.magnitude.clone()),
        );
        item.insert("depth".to_string(), AttributeValue::S(record.depth.clone()));
        item.insert(
            "reference_location".to_string(),
            AttributeValue::S(record.reference_location.clone()),
        );

        let optionals = [
            ("code", &record.code),
            ("latitude", &record.latitude),
            ("longitude", &record.longitude),
            ("intensity", &record.intensity),
            ("report_url", &record.report_url),
            ("created_at", &record.created_at),
            ("updated_at", &record.updated_at),
        ];
        for (name, value) in optionals {
            if let Some(value) = value {
                item.insert(name.to_string(), AttributeValue::S(value.clone()));
            }
        }
        item
    }
}

#[async_trait]
impl SnapshotStore for DynamoStore {
    async fn scan_keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .projection_expression("id")
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| AppError::write(format!("scan: {e}")))?;

            for item in output.items() {
                if let Some(AttributeValue::S(id)) = item.get("id") {
                    keys.push(id.clone());
                }
            }

            start_key = output.last_evaluated_key().cloned();
            if start_key.is_none() {
                break;
            }
        }

        log::info!("Scanned {} existing keys from {}", keys.len(), self.table_name);
        Ok(keys)
    }

    async fn delete_batch(&self, keys: &[String]) -> Result<()> {
        if keys.is_empty() {
            return Ok(());
        }

        let mut requests = Vec::with_capacity(keys.len());
        for key in keys {
            let delete = DeleteRequest::builder()
                .key("id", AttributeValue::S(key.clone()))
                .build()
                .map_err(|e| AppError::write(format!("delete request for {key}: {e}")))?;
            requests.push(WriteRequest::builder().delete_request(delete).build());
        }

        let output = self
            .client
            .batch_write_item()
            .request_items(&self.table_name, requests)
            .send()
            .await
            .map_err(|e| AppError::write(format!("batch delete: {e}")))?;

        // No retry policy: leftover unprocessed keys abort the run
        if output
            .unprocessed_items()
            .is_some_and(|items| !items.is_empty())
        {
            return Err(AppError::write("batch delete left unprocessed keys"));
        }
        Ok(())
    }

    async fn put(&self, record: &EarthquakeRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(Self::to_item(record)))
            .send()
            .await
            .map_err(|e| AppError::write(format!("put {}: {e}", record.id)))?;
        Ok(())
    }
}
