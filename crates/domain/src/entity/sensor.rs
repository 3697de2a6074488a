use super::{EntityType, ensure_range};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One sensor sample taken on a robot. Every channel is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorData {
    pub id: EntityId,
    pub robot_id: EntityId,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub battery_level: Option<f64>,
    pub imu_gyro: Option<Vector3>,
    pub imu_acc: Option<Vector3>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(SensorData, SensorData, parent = robot_id, check = check_fields);

impl SensorData {
    pub fn new(robot_id: EntityId) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            robot_id,
            temperature: None,
            humidity: None,
            pressure: None,
            battery_level: None,
            imu_gyro: None,
            imu_acc: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_environment(mut self, temperature: f64, humidity: f64, pressure: f64) -> Self {
        self.temperature = Some(temperature);
        self.humidity = Some(humidity);
        self.pressure = Some(pressure);
        self
    }

    pub fn with_battery(mut self, battery_level: f64) -> Self {
        self.battery_level = Some(battery_level);
        self
    }

    fn check_fields(&self) -> Result<()> {
        if let Some(humidity) = self.humidity {
            ensure_range(EntityType::SensorData, "humidity", humidity, 0.0, 100.0)?;
        }
        if let Some(battery) = self.battery_level {
            ensure_range(EntityType::SensorData, "battery_level", battery, 0.0, 100.0)?;
        }
        Ok(())
    }
}
