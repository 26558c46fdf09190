//! DynamoDB-backed status store.
//!
//! The status table is keyed by the dispatch message id with an implicit
//! timestamp sort key, so `ScanIndexForward = false` yields records
//! newest first.  `status` and `message` are DynamoDB reserved words,
//! hence the expression attribute names throughout.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use deploygate_core::record::{DeploymentStatusRecord, MessageId};
use deploygate_core::store::{StatusStore, StoreError};

/// [`StatusStore`] implementation over a DynamoDB table.
pub struct DynamoStatusStore {
    client: Client,
    table: String,
}

impl DynamoStatusStore {
    pub fn new(config: &aws_config::SdkConfig, table: String) -> Self {
        Self {
            client: Client::new(config),
            table,
        }
    }
}

#[async_trait]
impl StatusStore for DynamoStatusStore {
    async fn completed_records(
        &self,
        id: &MessageId,
    ) -> Result<Vec<DeploymentStatusRecord>, StoreError> {
        let output = self
            .client
            .query()
            .table_name(&self.table)
            .key_condition_expression("#id = :id")
            .filter_expression("#completed = :completed")
            .projection_expression("#id, #completed, #status, #message")
            .expression_attribute_names("#id", "id")
            .expression_attribute_names("#completed", "completed")
            .expression_attribute_names("#status", "status")
            .expression_attribute_names("#message", "message")
            .expression_attribute_values(":id", AttributeValue::S(id.as_str().to_string()))
            .expression_attribute_values(":completed", AttributeValue::Bool(true))
            .scan_index_forward(false)
            .send()
            .await
            .map_err(|e| StoreError::Query(e.to_string()))?;

        output
            .items
            .unwrap_or_default()
            .into_iter()
            .map(unmarshall_record)
            .collect()
    }
}

/// Decode one DynamoDB item into a status record.
fn unmarshall_record(
    item: HashMap<String, AttributeValue>,
) -> Result<DeploymentStatusRecord, StoreError> {
    Ok(DeploymentStatusRecord {
        id: string_attr(&item, "id")?,
        completed: bool_attr(&item, "completed")?,
        status: string_attr(&item, "status")?,
        message: string_attr(&item, "message")?,
    })
}

fn string_attr(
    item: &HashMap<String, AttributeValue>,
    name: &'static str,
) -> Result<String, StoreError> {
    match item.get(name) {
        Some(AttributeValue::S(value)) => Ok(value.clone()),
        Some(_) => Err(StoreError::Malformed(format!(
            "attribute {name} is not a string"
        ))),
        None => Err(StoreError::Malformed(format!("attribute {name} is missing"))),
    }
}

fn bool_attr(
    item: &HashMap<String, AttributeValue>,
    name: &'static str,
) -> Result<bool, StoreError> {
    match item.get(name) {
        Some(AttributeValue::Bool(value)) => Ok(*value),
        Some(_) => Err(StoreError::Malformed(format!(
            "attribute {name} is not a boolean"
        ))),
        None => Err(StoreError::Malformed(format!("attribute {name} is missing"))),
    }
}
