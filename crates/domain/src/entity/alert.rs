use super::{EntityType, ensure_non_empty, invalid};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
    Critical,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Alert {
    pub id: EntityId,
    pub robot_id: EntityId,
    pub level: AlertLevel,
    pub message: String,
    pub resolved: bool,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(Alert, Alert, parent = robot_id, check = check_fields);

impl Alert {
    pub fn new(robot_id: EntityId, level: AlertLevel, message: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            robot_id,
            level,
            message: message.into(),
            resolved: false,
            resolved_by: None,
            resolved_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_open(&self) -> bool {
        !self.resolved
    }

    fn check_fields(&self) -> Result<()> {
        ensure_non_empty(EntityType::Alert, "message", &self.message)?;
        if !self.resolved && (self.resolved_at.is_some() || self.resolved_by.is_some()) {
            return Err(invalid(
                EntityType::Alert,
                "open alert carries resolution metadata",
            ));
        }
        Ok(())
    }
}

/// Battery thresholds that raise alerts. A level strictly below
/// `critical_below` is critical, otherwise strictly below `warning_below`
/// is a warning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatteryAlertPolicy {
    pub warning_below: f64,
    pub critical_below: f64,
}

impl Default for BatteryAlertPolicy {
    fn default() -> Self {
        Self {
            warning_below: 20.0,
            critical_below: 10.0,
        }
    }
}

impl BatteryAlertPolicy {
    /// Alert level and message for a battery reading, if any
    pub fn evaluate(&self, battery_level: f64) -> Option<(AlertLevel, String)> {
        if battery_level < self.critical_below {
            Some((
                AlertLevel::Critical,
                format!("Battery critically low: {battery_level}%"),
            ))
        } else if battery_level < self.warning_below {
            Some((
                AlertLevel::Warning,
                format!("Battery low: {battery_level}%"),
            ))
        } else {
            None
        }
    }
}
