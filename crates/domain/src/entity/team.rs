use super::{EntityType, ensure_non_empty};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Team {
    pub id: EntityId,
    pub owner_id: EntityId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

root_entity!(Team, Team, check = check_fields);

impl Team {
    pub fn new(owner_id: EntityId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            owner_id,
            name: name.into(),
            description: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn check_fields(&self) -> Result<()> {
        ensure_non_empty(EntityType::Team, "name", &self.name)
    }
}

/// Membership of a user in a team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TeamMember {
    pub id: EntityId,
    pub team_id: EntityId,
    pub user_id: EntityId,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(TeamMember, TeamMember, parent = team_id, check = check_fields);

impl TeamMember {
    pub const DEFAULT_ROLE: &'static str = "Member";

    pub fn new(team_id: EntityId, user_id: EntityId, role: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            team_id,
            user_id,
            role: role.into(),
            created_at: now,
            updated_at: now,
        }
    }

    fn check_fields(&self) -> Result<()> {
        ensure_non_empty(EntityType::TeamMember, "role", &self.role)
    }
}
