//! Single-table key-value backend
//!
//! [`KeyValueEntityStore`] maps records onto one wide table using the
//! domain key layout, and delegates the actual item operations to a
//! [`KeyValueTable`]: DynamoDB in production, an in-process map in tests
//! and demo runs.

mod dynamo;
mod memory;
mod store;

pub use dynamo::{DynamoTable, attributes};
pub use memory::MemoryTable;
pub use store::KeyValueEntityStore;

use async_trait::async_trait;
use domain::keys::{IndexQuery, KeyPair};
use domain::{Document, DomainError, EntityType};

/// Item-level operations on a table keyed by `PK`/`SK` with three
/// string-keyed secondary indexes
#[async_trait]
pub trait KeyValueTable: Send + Sync {
    /// Write a new item; `false` when one with the same primary key exists
    async fn put_item(&self, item: Document) -> Result<bool, DomainError>;

    async fn get_item(&self, key: &KeyPair) -> Result<Option<Document>, DomainError>;

    /// Set attributes on an existing item; `false` when there is none
    async fn update_item(&self, key: &KeyPair, fields: &Document) -> Result<bool, DomainError>;

    /// Remove an item; `false` when there was none
    async fn delete_item(&self, key: &KeyPair) -> Result<bool, DomainError>;

    /// Items of one index partition whose sort key starts with the prefix
    async fn query(&self, query: &IndexQuery) -> Result<Vec<Document>, DomainError>;

    /// Every item, optionally restricted to one entity type
    async fn scan(&self, entity_type: Option<EntityType>) -> Result<Vec<Document>, DomainError>;
}
