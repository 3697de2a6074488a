use super::{EntityType, ensure_non_empty, invalid};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Active,
    OnHold,
    Completed,
    Archived,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl Default for ProjectStatus {
    fn default() -> Self {
        Self::Active
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: EntityId,
    pub owner_id: EntityId,
    pub team_id: Option<EntityId>,
    pub name: String,
    pub description: Option<String>,
    pub is_public: bool,
    pub status: ProjectStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

root_entity!(Project, Project, check = check_fields);

impl Project {
    pub fn new(owner_id: EntityId, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            owner_id,
            team_id: None,
            name: name.into(),
            description: None,
            is_public: false,
            status: ProjectStatus::default(),
            start_date: None,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_team(mut self, team_id: EntityId) -> Self {
        self.team_id = Some(team_id);
        self
    }

    fn check_fields(&self) -> Result<()> {
        ensure_non_empty(EntityType::Project, "name", &self.name)?;
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if end < start {
                return Err(invalid(EntityType::Project, "end_date precedes start_date"));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use chrono::Duration;

    #[test]
    fn test_project_status_as_str() {
        assert_eq!(ProjectStatus::OnHold.as_str(), "on_hold");
        let json = serde_json::to_string(&ProjectStatus::OnHold).unwrap();
        assert_eq!(json, "\"on_hold\"");
    }

    #[test]
    fn test_date_range() {
        let now = Utc::now();
        let mut project = Project::new(EntityId::generate(), "Warehouse patrol");
        project.start_date = Some(now);
        project.end_date = Some(now - Duration::days(1));
        assert!(project.validate().is_err());

        project.end_date = Some(now + Duration::days(30));
        assert!(project.validate().is_ok());
    }
}
