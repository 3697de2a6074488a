use super::KeyValueTable;
use async_trait::async_trait;
use domain::keys::{self, ENTITY_TYPE_ATTRIBUTE, KeyPair, PARTITION_KEY, ParentRef, SORT_KEY};
use domain::{Document, DomainError, EntityId, EntityStore, EntityType, StoredRecord};
use serde_json::Value;
use tracing::{debug, warn};

/// [`EntityStore`] over any single-table key-value backend
pub struct KeyValueEntityStore<T> {
    table: T,
}

impl<T: KeyValueTable> KeyValueEntityStore<T> {
    pub fn new(table: T) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &T {
        &self.table
    }

    /// Drop key attributes so callers only see record fields
    fn strip_keys(mut item: Document) -> Document {
        for attribute in keys::key_attributes() {
            item.remove(attribute);
        }
        item.remove(ENTITY_TYPE_ATTRIBUTE);
        item
    }

    fn is_kind(item: &Document, entity_type: EntityType) -> bool {
        item.get(ENTITY_TYPE_ATTRIBUTE).and_then(Value::as_str) == Some(entity_type.as_str())
    }

    fn item_key(item: &Document) -> Option<KeyPair> {
        let partition = item.get(PARTITION_KEY).and_then(Value::as_str)?;
        let sort = item.get(SORT_KEY).and_then(Value::as_str)?;
        Some(KeyPair {
            partition: partition.to_string(),
            sort: sort.to_string(),
        })
    }

    /// Keys of every item owned, directly or not, by one record.
    /// Owners come before the items they own.
    async fn owned_keys(
        &self,
        entity_type: EntityType,
        id: &EntityId,
    ) -> Result<Vec<KeyPair>, DomainError> {
        let mut keys = Vec::new();
        let mut owners = vec![(entity_type, id.clone())];

        while let Some((owner_type, owner_id)) = owners.pop() {
            for child_type in owner_type.child_types() {
                let query = keys::parent_query(child_type, &owner_id)?;
                for item in self.table.query(&query).await? {
                    let Some(key) = Self::item_key(&item) else {
                        warn!(entity_type = %child_type, partition = %query.partition, "Skipping item without key attributes");
                        continue;
                    };
                    if let Some(child_id) = item
                        .get("id")
                        .and_then(Value::as_str)
                        .and_then(|raw| EntityId::new(raw).ok())
                    {
                        owners.push((child_type, child_id));
                    }
                    keys.push(key);
                }
            }
        }
        Ok(keys)
    }
}

#[async_trait]
impl<T: KeyValueTable> EntityStore for KeyValueEntityStore<T> {
    async fn insert(&self, record: &StoredRecord) -> Result<(), DomainError> {
        let parent = match (record.entity_type.parent_type(), &record.parent_id) {
            (Some(parent_type), Some(parent_id)) => {
                Some(ParentRef::new(parent_type, parent_id.clone()))
            }
            (None, Some(_)) => return Err(DomainError::UnexpectedParent(record.entity_type)),
            (Some(_), None) => return Err(DomainError::MissingParent(record.entity_type)),
            (None, None) => None,
        };
        let keys = keys::derive_keys(
            record.entity_type,
            &record.id,
            parent.as_ref(),
            record.created_at,
        )?;

        let mut item = record.fields.clone();
        for (name, value) in keys.attributes() {
            item.insert(name.to_string(), Value::String(value));
        }
        item.insert(
            ENTITY_TYPE_ATTRIBUTE.to_string(),
            Value::String(record.entity_type.as_str().to_string()),
        );

        if !self.table.put_item(item).await? {
            return Err(DomainError::AlreadyExists {
                entity: record.entity_type,
                id: record.id.to_string(),
            });
        }
        debug!(entity_type = %record.entity_type, id = %record.id, pk = %keys.primary.partition, "Put item");
        Ok(())
    }

    async fn get(
        &self,
        entity_type: EntityType,
        id: &EntityId,
    ) -> Result<Option<Document>, DomainError> {
        let key = keys::primary_key(entity_type, id);
        Ok(self.table.get_item(&key).await?.map(Self::strip_keys))
    }

    async fn list_by_parent(
        &self,
        entity_type: EntityType,
        parent_id: &EntityId,
        limit: Option<usize>,
    ) -> Result<Vec<Document>, DomainError> {
        let query = keys::parent_query(entity_type, parent_id)?.with_limit(limit);
        let items = self.table.query(&query).await?;

        let mut documents = Vec::with_capacity(items.len());
        for item in items {
            if !Self::is_kind(&item, entity_type) {
                warn!(
                    entity_type = %entity_type,
                    partition = %query.partition,
                    "Skipping item with mismatched entity_type"
                );
                continue;
            }
            documents.push(Self::strip_keys(item));
        }
        Ok(documents)
    }

    async fn update_fields(
        &self,
        entity_type: EntityType,
        id: &EntityId,
        fields: &Document,
    ) -> Result<bool, DomainError> {
        let key = keys::primary_key(entity_type, id);
        let reserved = keys::key_attributes()
            .chain([ENTITY_TYPE_ATTRIBUTE])
            .find(|name| fields.contains_key(*name));
        if let Some(name) = reserved {
            return Err(DomainError::ImmutableField(name.to_string()));
        }

        self.table.update_item(&key, fields).await
    }

    async fn list_all(&self, entity_type: EntityType) -> Result<Vec<Document>, DomainError> {
        let items = self.table.scan(Some(entity_type)).await?;
        Ok(items.into_iter().map(Self::strip_keys).collect())
    }

    /// Owned items are removed before their owners
    async fn delete(&self, entity_type: EntityType, id: &EntityId) -> Result<bool, DomainError> {
        let key = keys::primary_key(entity_type, id);
        if self.table.get_item(&key).await?.is_none() {
            return Ok(false);
        }

        let owned = self.owned_keys(entity_type, id).await?;
        for child in owned.iter().rev() {
            self.table.delete_item(child).await?;
        }
        let deleted = self.table.delete_item(&key).await?;

        debug!(entity_type = %entity_type, id = %id, owned = owned.len(), "Deleted item");
        Ok(deleted)
    }
}
