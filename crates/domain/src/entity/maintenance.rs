use super::{EntityType, ensure_non_empty, ensure_non_negative, invalid};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    Scheduled,
    Emergency,
    Preventive,
    SoftwareUpdate,
    AiModelUpdate,
}

impl MaintenanceType {
    pub const ALL: [MaintenanceType; 5] = [
        Self::Scheduled,
        Self::Emergency,
        Self::Preventive,
        Self::SoftwareUpdate,
        Self::AiModelUpdate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Emergency => "emergency",
            Self::Preventive => "preventive",
            Self::SoftwareUpdate => "software_update",
            Self::AiModelUpdate => "ai_model_update",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl MaintenanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl Default for MaintenanceStatus {
    fn default() -> Self {
        Self::Scheduled
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaintenanceRecord {
    pub id: EntityId,
    pub robot_id: EntityId,
    pub maintenance_type: MaintenanceType,
    pub status: MaintenanceStatus,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub technician: Option<String>,
    pub cost: Option<f64>,
    #[serde(default)]
    pub parts_replaced: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(MaintenanceRecord, MaintenanceRecord, parent = robot_id, check = check_fields);

impl MaintenanceRecord {
    pub fn new(
        robot_id: EntityId,
        maintenance_type: MaintenanceType,
        description: impl Into<String>,
        start_date: DateTime<Utc>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            robot_id,
            maintenance_type,
            status: MaintenanceStatus::default(),
            description: description.into(),
            start_date,
            end_date: None,
            technician: None,
            cost: None,
            parts_replaced: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn check_fields(&self) -> Result<()> {
        let kind = EntityType::MaintenanceRecord;
        ensure_non_empty(kind, "description", &self.description)?;
        if let Some(cost) = self.cost {
            ensure_non_negative(kind, "cost", cost)?;
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(invalid(kind, "end_date precedes start_date"));
            }
        }
        Ok(())
    }
}
