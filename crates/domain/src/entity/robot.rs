use super::{ensure_non_empty, ensure_non_negative, ensure_range, invalid};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Robot operational status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RobotStatus {
    Online,
    Offline,
    Maintenance,
    Error,
    Charging,
    Moving,
    Idle,
}

impl RobotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Maintenance => "maintenance",
            Self::Error => "error",
            Self::Charging => "charging",
            Self::Moving => "moving",
            Self::Idle => "idle",
        }
    }

    pub fn is_online(&self) -> bool {
        matches!(self, Self::Online)
    }

    /// Points subtracted from the health score for this status
    pub fn health_penalty(&self) -> f64 {
        match self {
            Self::Offline => 50.0,
            Self::Error => 40.0,
            Self::Maintenance => 20.0,
            _ => 0.0,
        }
    }
}

impl Default for RobotStatus {
    fn default() -> Self {
        Self::Offline
    }
}

impl std::fmt::Display for RobotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a robot is, either on a site floor plan or on the globe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", deny_unknown_fields)]
pub enum Location {
    Planar {
        x: f64,
        y: f64,
    },
    Geographic {
        latitude: f64,
        longitude: f64,
        altitude: Option<f64>,
        accuracy: Option<f64>,
    },
}

impl Location {
    pub fn geographic(latitude: f64, longitude: f64) -> Self {
        Self::Geographic {
            latitude,
            longitude,
            altitude: None,
            accuracy: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Robot {
    pub id: EntityId,
    pub project_id: Option<EntityId>,
    pub name: String,
    pub model: String,
    pub status: RobotStatus,
    pub battery_level: f64,
    pub signal_strength: Option<f64>,
    pub ping_ms: Option<u32>,
    pub location: Option<Location>,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
    pub firmware_version: Option<String>,
    pub total_operating_hours: f64,
    pub last_maintenance_at: Option<DateTime<Utc>>,
    pub next_maintenance_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

root_entity!(Robot, Robot, check = check_fields);

impl Robot {
    /// A freshly commissioned robot: offline, fully charged
    pub fn new(name: impl Into<String>, model: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            project_id: None,
            name: name.into(),
            model: model.into(),
            status: RobotStatus::default(),
            battery_level: 100.0,
            signal_strength: None,
            ping_ms: None,
            location: None,
            manufacturer: None,
            serial_number: None,
            firmware_version: None,
            total_operating_hours: 0.0,
            last_maintenance_at: None,
            next_maintenance_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = id;
        self
    }

    pub fn with_project(mut self, project_id: EntityId) -> Self {
        self.project_id = Some(project_id);
        self
    }

    pub fn with_status(mut self, status: RobotStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_battery(mut self, battery_level: f64) -> Self {
        self.battery_level = battery_level;
        self
    }

    pub fn with_location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn is_online(&self) -> bool {
        self.status.is_online()
    }

    /// Maintenance is due once the scheduled date has passed
    pub fn needs_maintenance(&self, now: DateTime<Utc>) -> bool {
        self.next_maintenance_at.is_some_and(|due| now >= due)
    }

    /// Health score in [0, 100] from battery, status and maintenance schedule
    pub fn health_score(&self, now: DateTime<Utc>) -> f64 {
        let mut score = 100.0;

        if self.battery_level < 20.0 {
            score -= 30.0;
        } else if self.battery_level < 50.0 {
            score -= 15.0;
        }

        score -= self.status.health_penalty();

        if self.needs_maintenance(now) {
            score -= 25.0;
        }

        f64::max(0.0, score)
    }

    fn check_fields(&self) -> Result<()> {
        let kind = super::EntityType::Robot;
        ensure_non_empty(kind, "name", &self.name)?;
        ensure_range(kind, "battery_level", self.battery_level, 0.0, 100.0)?;
        if let Some(signal) = self.signal_strength {
            ensure_range(kind, "signal_strength", signal, 0.0, 100.0)?;
        }
        ensure_non_negative(kind, "total_operating_hours", self.total_operating_hours)?;

        if let Some(Location::Geographic {
            latitude,
            longitude,
            ..
        }) = self.location
        {
            ensure_range(kind, "latitude", latitude, -90.0, 90.0)?;
            ensure_range(kind, "longitude", longitude, -180.0, 180.0)?;
        }

        if let (Some(last), Some(next)) = (self.last_maintenance_at, self.next_maintenance_at) {
            if next < last {
                return Err(invalid(
                    kind,
                    "next_maintenance_at precedes last_maintenance_at",
                ));
            }
        }
        Ok(())
    }
}
