use crate::entity::{Entity, EntityType};
use crate::error::{DomainError, Result};
use crate::id::EntityId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

/// A record's fields as a JSON object, keyed by field name
pub type Document = serde_json::Map<String, Value>;

/// Convert a JSON object literal into a document
pub fn document(value: Value) -> Result<Document> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(DomainError::InvalidPatch(format!(
            "expected an object of fields, got {other}"
        ))),
    }
}

/// A record ready to be written by any store
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecord {
    pub entity_type: EntityType,
    pub id: EntityId,
    pub parent_id: Option<EntityId>,
    /// Orders log-like kinds under their parent
    pub created_at: DateTime<Utc>,
    pub fields: Document,
}

impl StoredRecord {
    pub fn from_entity<E: Entity>(entity: &E) -> Result<Self> {
        Ok(Self {
            entity_type: E::TYPE,
            id: entity.id().clone(),
            parent_id: entity.parent_id().cloned(),
            created_at: entity.created_at(),
            fields: entity.to_document()?,
        })
    }
}

/// Canonical document-level contract shared by every backend
///
/// Stores deal in untyped documents; typing and validation happen above
/// them. Not-found is reported as `None`/`false`, never as an error.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Write a new record; an existing id is `AlreadyExists`
    async fn insert(&self, record: &StoredRecord) -> Result<()>;

    async fn get(&self, entity_type: EntityType, id: &EntityId) -> Result<Option<Document>>;

    /// Children of one parent, newest first for log-like kinds
    async fn list_by_parent(
        &self,
        entity_type: EntityType,
        parent_id: &EntityId,
        limit: Option<usize>,
    ) -> Result<Vec<Document>>;

    /// Overwrite the given fields; returns `false` when the record is missing
    async fn update_fields(
        &self,
        entity_type: EntityType,
        id: &EntityId,
        fields: &Document,
    ) -> Result<bool>;

    async fn list_all(&self, entity_type: EntityType) -> Result<Vec<Document>>;

    /// Remove a record together with everything it owns
    async fn delete(&self, entity_type: EntityType, id: &EntityId) -> Result<bool>;
}
