use super::robot::RobotStatus;
use super::{EntityType, ensure_non_empty, ensure_range};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A command sent to a robot, kept as an append-only log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandHistory {
    pub id: EntityId,
    pub robot_id: EntityId,
    pub user_id: Option<EntityId>,
    pub command_type: String,
    #[serde(default)]
    pub detail: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(CommandHistory, CommandHistory, parent = robot_id, check = check_fields);

impl CommandHistory {
    pub fn new(robot_id: EntityId, command_type: impl Into<String>, detail: Value) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            robot_id,
            user_id: None,
            command_type: command_type.into(),
            detail,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn issued_by(mut self, user_id: EntityId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    fn check_fields(&self) -> Result<()> {
        ensure_non_empty(EntityType::CommandHistory, "command_type", &self.command_type)
    }
}

/// Snapshot appended whenever a robot changes status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RobotStatusHistory {
    pub id: EntityId,
    pub robot_id: EntityId,
    pub status: RobotStatus,
    pub battery_level: Option<f64>,
    pub connection: Option<String>,
    pub event: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(RobotStatusHistory, RobotStatusHistory, parent = robot_id, check = check_fields);

impl RobotStatusHistory {
    pub fn new(robot_id: EntityId, status: RobotStatus) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            robot_id,
            status,
            battery_level: None,
            connection: None,
            event: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn check_fields(&self) -> Result<()> {
        if let Some(battery) = self.battery_level {
            ensure_range(
                EntityType::RobotStatusHistory,
                "battery_level",
                battery,
                0.0,
                100.0,
            )?;
        }
        Ok(())
    }
}
