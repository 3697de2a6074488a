use crate::error::{DomainError, Result};
use serde::{Deserialize, Serialize};

/// Value object identifying any stored record
///
/// Rules:
/// - Must be non-empty
/// - Max length 128 characters
/// - Must not contain '#', the key segment separator
/// - Generated ids are time-ordered UUIDv7 strings, unique across processes
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    pub const MAX_LEN: usize = 128;

    /// Create an EntityId with validation
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();

        if id.is_empty() {
            return Err(DomainError::InvalidId("ID cannot be empty".to_string()));
        }

        if id.len() > Self::MAX_LEN {
            return Err(DomainError::InvalidId(format!(
                "ID too long: {} chars (max {})",
                id.len(),
                Self::MAX_LEN
            )));
        }

        if id.contains('#') {
            return Err(DomainError::InvalidId(format!(
                "ID {id} must not contain '#'"
            )));
        }

        Ok(Self(id))
    }

    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Generate an identifier whose time component is `at`, so ids of
    /// back-dated records still sort by their timestamps
    pub fn generate_at(at: chrono::DateTime<chrono::Utc>) -> Self {
        let ts = uuid::Timestamp::from_unix(
            uuid::NoContext,
            at.timestamp().max(0) as u64,
            at.timestamp_subsec_nanos(),
        );
        Self(uuid::Uuid::new_v7(ts).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl std::str::FromStr for EntityId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
