use super::KeyValueTable;
use async_trait::async_trait;
use domain::keys::{ENTITY_TYPE_ATTRIBUTE, IndexQuery, KeyPair, PARTITION_KEY, SORT_KEY};
use domain::{Document, DomainError, EntityType};
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use tokio::sync::RwLock;

/// In-process table with the same key and index semantics as the
/// DynamoDB layout. Items are ordered by primary key; index queries sort
/// by the index sort key like DynamoDB does.
#[derive(Default)]
pub struct MemoryTable {
    items: RwLock<BTreeMap<(String, String), Document>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    fn string_attr<'a>(item: &'a Document, name: &str) -> Option<&'a str> {
        item.get(name).and_then(Value::as_str)
    }

    fn primary(item: &Document) -> Result<(String, String), DomainError> {
        match (
            Self::string_attr(item, PARTITION_KEY),
            Self::string_attr(item, SORT_KEY),
        ) {
            (Some(pk), Some(sk)) => Ok((pk.to_string(), sk.to_string())),
            _ => Err(DomainError::Storage(
                "item is missing its PK/SK string attributes".to_string(),
            )),
        }
    }

    fn key_of(key: &KeyPair) -> (String, String) {
        (key.partition.clone(), key.sort.clone())
    }
}

#[async_trait]
impl KeyValueTable for MemoryTable {
    async fn put_item(&self, item: Document) -> Result<bool, DomainError> {
        let key = Self::primary(&item)?;
        match self.items.write().await.entry(key) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(item);
                Ok(true)
            }
        }
    }

    async fn get_item(&self, key: &KeyPair) -> Result<Option<Document>, DomainError> {
        Ok(self.items.read().await.get(&Self::key_of(key)).cloned())
    }

    async fn update_item(&self, key: &KeyPair, fields: &Document) -> Result<bool, DomainError> {
        let mut items = self.items.write().await;
        let Some(item) = items.get_mut(&Self::key_of(key)) else {
            return Ok(false);
        };
        for (name, value) in fields {
            item.insert(name.clone(), value.clone());
        }
        Ok(true)
    }

    async fn delete_item(&self, key: &KeyPair) -> Result<bool, DomainError> {
        Ok(self.items.write().await.remove(&Self::key_of(key)).is_some())
    }

    async fn query(&self, query: &IndexQuery) -> Result<Vec<Document>, DomainError> {
        let partition_attr = query.index.partition_attribute();
        let sort_attr = query.index.sort_attribute();

        let items = self.items.read().await;
        let mut matched: Vec<(&str, &Document)> = items
            .values()
            .filter(|item| Self::string_attr(item, partition_attr) == Some(query.partition.as_str()))
            .filter_map(|item| {
                Self::string_attr(item, sort_attr)
                    .filter(|sort| sort.starts_with(&query.sort_prefix))
                    .map(|sort| (sort, item))
            })
            .collect();

        matched.sort_by(|a, b| a.0.cmp(b.0));
        if query.newest_first {
            matched.reverse();
        }
        if let Some(limit) = query.limit {
            matched.truncate(limit);
        }

        Ok(matched.into_iter().map(|(_, item)| item.clone()).collect())
    }

    async fn scan(&self, entity_type: Option<EntityType>) -> Result<Vec<Document>, DomainError> {
        let items = self.items.read().await;
        Ok(items
            .values()
            .filter(|item| match entity_type {
                Some(kind) => Self::string_attr(item, ENTITY_TYPE_ATTRIBUTE) == Some(kind.as_str()),
                None => true,
            })
            .cloned()
            .collect())
    }
}
