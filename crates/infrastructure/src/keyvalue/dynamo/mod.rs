pub mod attributes;

use super::KeyValueTable;
use async_trait::async_trait;
use attributes::{from_item, to_attribute, to_item};
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::config::Region;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, BillingMode, GlobalSecondaryIndex, KeySchemaElement,
    KeyType, Projection, ProjectionType, ReturnValue, ScalarAttributeType,
};
use domain::keys::{
    self, ENTITY_TYPE_ATTRIBUTE, IndexQuery, KeyPair, PARTITION_KEY, SORT_KEY, SecondaryIndex,
};
use domain::{Document, DomainError, EntityType};
use std::collections::HashMap;
use tracing::{debug, error, info};

/// The fleet table in DynamoDB
pub struct DynamoTable {
    client: Client,
    table_name: String,
}

impl DynamoTable {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Build a client from the default AWS credential chain
    pub async fn connect(
        region: &str,
        endpoint_url: Option<&str>,
        table_name: impl Into<String>,
    ) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(Region::new(region.to_string()));
        if let Some(url) = endpoint_url {
            loader = loader.endpoint_url(url);
        }
        let config = loader.load().await;

        let table = Self::new(Client::new(&config), table_name);
        info!(region, table = %table.table_name, "DynamoDB client initialized");
        table
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Create the table with its three indexes. Returns `false` when it
    /// already exists.
    pub async fn create_table(&self) -> anyhow::Result<bool> {
        let mut request = self
            .client
            .create_table()
            .table_name(&self.table_name)
            .billing_mode(BillingMode::PayPerRequest)
            .key_schema(key_element(PARTITION_KEY, KeyType::Hash)?)
            .key_schema(key_element(SORT_KEY, KeyType::Range)?);

        for attribute in keys::key_attributes() {
            request = request.attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name(attribute)
                    .attribute_type(ScalarAttributeType::S)
                    .build()?,
            );
        }

        for index in SecondaryIndex::ALL {
            request = request.global_secondary_indexes(
                GlobalSecondaryIndex::builder()
                    .index_name(index.name())
                    .key_schema(key_element(index.partition_attribute(), KeyType::Hash)?)
                    .key_schema(key_element(index.sort_attribute(), KeyType::Range)?)
                    .projection(
                        Projection::builder()
                            .projection_type(ProjectionType::All)
                            .build(),
                    )
                    .build()?,
            );
        }

        match request.send().await {
            Ok(_) => {
                info!(table = %self.table_name, "Created DynamoDB table");
                Ok(true)
            }
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|err| err.is_resource_in_use_exception()) =>
            {
                info!(table = %self.table_name, "DynamoDB table already exists");
                Ok(false)
            }
            Err(e) => Err(anyhow::anyhow!(
                "Failed to create table {}: {}",
                self.table_name,
                DisplayErrorContext(&e)
            )),
        }
    }

    fn storage_error(&self, op: &str, err: impl std::error::Error) -> DomainError {
        let message = DisplayErrorContext(&err).to_string();
        error!(op, table = %self.table_name, error = %message, "DynamoDB request failed");
        DomainError::Storage(format!("DynamoDB {op} failed: {message}"))
    }

    fn key_map(key: &KeyPair) -> HashMap<String, AttributeValue> {
        HashMap::from([
            (
                PARTITION_KEY.to_string(),
                AttributeValue::S(key.partition.clone()),
            ),
            (SORT_KEY.to_string(), AttributeValue::S(key.sort.clone())),
        ])
    }
}

fn key_element(name: &str, key_type: KeyType) -> anyhow::Result<KeySchemaElement> {
    Ok(KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()?)
}

#[async_trait]
impl KeyValueTable for DynamoTable {
    async fn put_item(&self, item: Document) -> Result<bool, DomainError> {
        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(to_item(&item)))
            .condition_expression(format!("attribute_not_exists({PARTITION_KEY})"))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|err| err.is_conditional_check_failed_exception()) =>
            {
                debug!("Put skipped, item already exists");
                Ok(false)
            }
            Err(e) => Err(self.storage_error("put_item", e)),
        }
    }

    async fn get_item(&self, key: &KeyPair) -> Result<Option<Document>, DomainError> {
        let output = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key_map(key)))
            .send()
            .await
            .map_err(|e| self.storage_error("get_item", e))?;

        Ok(output.item.as_ref().map(from_item))
    }

    async fn update_item(&self, key: &KeyPair, fields: &Document) -> Result<bool, DomainError> {
        if fields.is_empty() {
            return Err(DomainError::InvalidPatch("no fields to update".to_string()));
        }

        let mut assignments = Vec::with_capacity(fields.len());
        let mut names = HashMap::new();
        let mut values = HashMap::new();
        for (i, (name, value)) in fields.iter().enumerate() {
            assignments.push(format!("#f{i} = :v{i}"));
            names.insert(format!("#f{i}"), name.clone());
            values.insert(format!(":v{i}"), to_attribute(value));
        }

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key_map(key)))
            .update_expression(format!("SET {}", assignments.join(", ")))
            .condition_expression(format!("attribute_exists({PARTITION_KEY})"))
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(e)
                if e
                    .as_service_error()
                    .is_some_and(|err| err.is_conditional_check_failed_exception()) =>
            {
                debug!(pk = %key.partition, "Update skipped, item does not exist");
                Ok(false)
            }
            Err(e) => Err(self.storage_error("update_item", e)),
        }
    }

    async fn delete_item(&self, key: &KeyPair) -> Result<bool, DomainError> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(Self::key_map(key)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(|e| self.storage_error("delete_item", e))?;

        Ok(output.attributes.is_some_and(|old| !old.is_empty()))
    }

    async fn query(&self, query: &IndexQuery) -> Result<Vec<Document>, DomainError> {
        if query.limit == Some(0) {
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();
        let mut start_key = None;
        loop {
            let remaining = query
                .limit
                .map(|limit| limit.saturating_sub(documents.len()) as i32);

            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .index_name(query.index.name())
                .key_condition_expression("#pk = :pk AND begins_with(#sk, :prefix)")
                .expression_attribute_names("#pk", query.index.partition_attribute())
                .expression_attribute_names("#sk", query.index.sort_attribute())
                .expression_attribute_values(":pk", AttributeValue::S(query.partition.clone()))
                .expression_attribute_values(
                    ":prefix",
                    AttributeValue::S(query.sort_prefix.clone()),
                )
                .scan_index_forward(!query.newest_first)
                .set_limit(remaining)
                .set_exclusive_start_key(start_key.take())
                .send()
                .await
                .map_err(|e| self.storage_error("query", e))?;

            if let Some(items) = output.items {
                documents.extend(items.iter().map(from_item));
            }
            if query.limit.is_some_and(|limit| documents.len() >= limit) {
                break;
            }
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        if let Some(limit) = query.limit {
            documents.truncate(limit);
        }
        debug!(index = query.index.name(), partition = %query.partition, count = documents.len(), "Queried index");
        Ok(documents)
    }

    async fn scan(&self, entity_type: Option<EntityType>) -> Result<Vec<Document>, DomainError> {
        let mut documents = Vec::new();
        let mut start_key = None;
        loop {
            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key.take());
            if let Some(kind) = entity_type {
                request = request
                    .filter_expression("#et = :et")
                    .expression_attribute_names("#et", ENTITY_TYPE_ATTRIBUTE)
                    .expression_attribute_values(":et", AttributeValue::S(kind.as_str().to_string()));
            }

            let output = request
                .send()
                .await
                .map_err(|e| self.storage_error("scan", e))?;

            if let Some(items) = output.items {
                documents.extend(items.iter().map(from_item));
            }
            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }
        Ok(documents)
    }
}
