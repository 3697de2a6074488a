use crate::entity::EntityType;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Invalid entity ID: {0}")]
    InvalidId(String),

    #[error("Unknown entity type: {0}")]
    UnknownEntityType(String),

    #[error("{0} requires an owning parent")]
    MissingParent(EntityType),

    #[error("{0} is a root entity and takes no parent")]
    UnexpectedParent(EntityType),

    #[error("{entity} must belong to {expected}, got {actual}")]
    ParentMismatch {
        entity: EntityType,
        expected: EntityType,
        actual: EntityType,
    },

    #[error("{0} has no owning parent to list by")]
    NotAChild(EntityType),

    #[error("Invalid {entity}: {reason}")]
    InvalidEntity { entity: EntityType, reason: String },

    #[error("Invalid update: {0}")]
    InvalidPatch(String),

    #[error("Field '{0}' cannot be updated")]
    ImmutableField(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityType, id: String },

    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: EntityType, id: String },

    #[error("Parent {entity} not found: {id}")]
    ParentNotFound { entity: EntityType, id: String },

    #[error("Malformed {entity} record: {reason}")]
    MalformedRecord { entity: EntityType, reason: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: EntityType, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn storage(err: impl std::fmt::Display) -> Self {
        Self::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DomainError>;
