//! Single-table key layout
//!
//! Every record lives under a primary pair `PK = SK = "{TYPE}#{id}"` and
//! one secondary-index pair. Root entities head their own group in the
//! index; children are filed under their owning parent's partition with a
//! per-kind sort prefix, so listing a parent's children is one prefix
//! query. Log-like kinds put their creation time ahead of the id in that
//! sort key, so index order is time order whatever the ids look like.

use crate::entity::EntityType;
use crate::error::{DomainError, Result};
use crate::id::EntityId;
use chrono::{DateTime, Utc};

pub const PARTITION_KEY: &str = "PK";
pub const SORT_KEY: &str = "SK";
pub const ENTITY_TYPE_ATTRIBUTE: &str = "entity_type";

const SEPARATOR: char = '#';

/// Global secondary indexes of the fleet table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecondaryIndex {
    /// Users and teams
    Gsi1,
    /// Projects and reports
    Gsi2,
    /// Robots and everything attached to them
    Gsi3,
}

impl SecondaryIndex {
    pub const ALL: [SecondaryIndex; 3] = [Self::Gsi1, Self::Gsi2, Self::Gsi3];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Gsi1 => "GSI1",
            Self::Gsi2 => "GSI2",
            Self::Gsi3 => "GSI3",
        }
    }

    pub fn partition_attribute(&self) -> &'static str {
        match self {
            Self::Gsi1 => "GSI1PK",
            Self::Gsi2 => "GSI2PK",
            Self::Gsi3 => "GSI3PK",
        }
    }

    pub fn sort_attribute(&self) -> &'static str {
        match self {
            Self::Gsi1 => "GSI1SK",
            Self::Gsi2 => "GSI2SK",
            Self::Gsi3 => "GSI3SK",
        }
    }
}

/// Names of every key attribute an item may carry
pub fn key_attributes() -> impl Iterator<Item = &'static str> {
    [PARTITION_KEY, SORT_KEY].into_iter().chain(
        SecondaryIndex::ALL
            .into_iter()
            .flat_map(|index| [index.partition_attribute(), index.sort_attribute()]),
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPair {
    pub partition: String,
    pub sort: String,
}

/// Reference to an owning parent record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub entity_type: EntityType,
    pub id: EntityId,
}

impl ParentRef {
    pub fn new(entity_type: EntityType, id: EntityId) -> Self {
        Self { entity_type, id }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityKeys {
    pub primary: KeyPair,
    pub index: SecondaryIndex,
    pub secondary: KeyPair,
}

impl EntityKeys {
    /// Key attributes to write alongside the record's fields
    pub fn attributes(&self) -> [(&'static str, String); 4] {
        [
            (PARTITION_KEY, self.primary.partition.clone()),
            (SORT_KEY, self.primary.sort.clone()),
            (self.index.partition_attribute(), self.secondary.partition.clone()),
            (self.index.sort_attribute(), self.secondary.sort.clone()),
        ]
    }
}

fn segment(prefix: &str, id: &EntityId) -> String {
    format!("{prefix}{SEPARATOR}{id}")
}

/// Fixed-width UTC timestamp; lexical order matches time order
fn sort_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%dT%H:%M:%S%.9fZ").to_string()
}

fn child_sort_key(entity_type: EntityType, id: &EntityId, created_at: DateTime<Utc>) -> String {
    if entity_type.newest_first() {
        format!(
            "{}{SEPARATOR}{}{SEPARATOR}{id}",
            entity_type.sort_prefix(),
            sort_stamp(created_at)
        )
    } else {
        segment(entity_type.sort_prefix(), id)
    }
}

/// Primary key pair of a record
pub fn primary_key(entity_type: EntityType, id: &EntityId) -> KeyPair {
    let key = segment(entity_type.as_str(), id);
    KeyPair {
        partition: key.clone(),
        sort: key,
    }
}

/// Derive every key of a record from its kind, id, owning parent and
/// creation time
pub fn derive_keys(
    entity_type: EntityType,
    id: &EntityId,
    parent: Option<&ParentRef>,
    created_at: DateTime<Utc>,
) -> Result<EntityKeys> {
    let secondary = match (entity_type.parent_type(), parent) {
        (None, None) => {
            let key = segment(entity_type.sort_prefix(), id);
            KeyPair {
                partition: key.clone(),
                sort: key,
            }
        }
        (None, Some(_)) => return Err(DomainError::UnexpectedParent(entity_type)),
        (Some(_), None) => return Err(DomainError::MissingParent(entity_type)),
        (Some(expected), Some(parent)) => {
            if parent.entity_type != expected {
                return Err(DomainError::ParentMismatch {
                    entity: entity_type,
                    expected,
                    actual: parent.entity_type,
                });
            }
            KeyPair {
                partition: segment(parent.entity_type.as_str(), &parent.id),
                sort: child_sort_key(entity_type, id, created_at),
            }
        }
    };

    Ok(EntityKeys {
        primary: primary_key(entity_type, id),
        index: entity_type.index(),
        secondary,
    })
}

/// Index query selecting the children of one parent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexQuery {
    pub index: SecondaryIndex,
    pub partition: String,
    pub sort_prefix: String,
    pub newest_first: bool,
    pub limit: Option<usize>,
}

impl IndexQuery {
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }
}

pub fn parent_query(entity_type: EntityType, parent_id: &EntityId) -> Result<IndexQuery> {
    let parent_type = entity_type
        .parent_type()
        .ok_or(DomainError::NotAChild(entity_type))?;

    Ok(IndexQuery {
        index: entity_type.index(),
        partition: segment(parent_type.as_str(), parent_id),
        sort_prefix: format!("{}{SEPARATOR}", entity_type.sort_prefix()),
        newest_first: entity_type.newest_first(),
        limit: None,
    })
}
