use crate::repository::FleetRepository;
use chrono::Utc;
use domain::{
    Alert, AlertLevel, BatteryAlertPolicy, Camera, CommandHistory, Document, EntityId, Location,
    Result, Robot, RobotStatus, RobotStatusHistory, SensorData, StreamQuality, StreamType,
    document,
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{info, warn};

/// Readings included in a health summary
const RECENT_READINGS: usize = 10;

/// Snapshot of one robot's condition
#[derive(Debug, Clone, Serialize)]
pub struct HealthSummary {
    pub robot: Robot,
    pub health_score: f64,
    pub open_alerts: usize,
    pub needs_maintenance: bool,
    pub recent_readings: Vec<SensorData>,
}

/// Robot lifecycle, telemetry intake and alerting
#[derive(Clone)]
pub struct RobotService {
    repo: FleetRepository,
    battery_policy: BatteryAlertPolicy,
}

impl RobotService {
    pub fn new(repo: FleetRepository) -> Self {
        Self {
            repo,
            battery_policy: BatteryAlertPolicy::default(),
        }
    }

    pub fn with_battery_policy(mut self, policy: BatteryAlertPolicy) -> Self {
        self.battery_policy = policy;
        self
    }

    pub fn repository(&self) -> &FleetRepository {
        &self.repo
    }

    pub async fn register_robot(&self, robot: Robot) -> Result<Robot> {
        let robot = self.repo.create_record(robot).await?;
        info!(robot_id = %robot.id, name = %robot.name, "Robot registered");

        self.check_battery(&robot.id, robot.battery_level).await?;
        Ok(robot)
    }

    pub async fn get_robot(&self, robot_id: &EntityId) -> Result<Option<Robot>> {
        self.repo.get_by_id(robot_id).await
    }

    pub async fn all_robots(&self) -> Result<Vec<Robot>> {
        self.repo.list_all().await
    }

    pub async fn online_robots(&self) -> Result<Vec<Robot>> {
        let robots = self.all_robots().await?;
        Ok(robots.into_iter().filter(Robot::is_online).collect())
    }

    async fn patch_robot(&self, robot_id: &EntityId, patch: Value) -> Result<Robot> {
        self.repo.update_fields(robot_id, document(patch)?).await
    }

    /// Store a new battery level and raise an alert when it is low
    pub async fn update_battery(&self, robot_id: &EntityId, level: f64) -> Result<Robot> {
        let robot = self
            .patch_robot(robot_id, json!({"battery_level": level}))
            .await?;

        self.check_battery(robot_id, level).await?;
        Ok(robot)
    }

    async fn check_battery(&self, robot_id: &EntityId, level: f64) -> Result<Option<Alert>> {
        let Some((alert_level, message)) = self.battery_policy.evaluate(level) else {
            return Ok(None);
        };

        warn!(robot_id = %robot_id, battery = level, level = %alert_level, "Low battery");
        self.raise_alert(robot_id, alert_level, message).await.map(Some)
    }

    /// Store a reading; a reading that reports battery also updates the robot
    pub async fn record_sensor_data(&self, reading: SensorData) -> Result<SensorData> {
        let reading = self.repo.create_record(reading).await?;

        if let Some(level) = reading.battery_level {
            self.update_battery(&reading.robot_id, level).await?;
        }
        Ok(reading)
    }

    /// Change status and append the transition to the robot's history
    pub async fn update_status(
        &self,
        robot_id: &EntityId,
        status: RobotStatus,
        event: Option<&str>,
    ) -> Result<Robot> {
        let robot = self.patch_robot(robot_id, json!({"status": status})).await?;

        let mut entry = RobotStatusHistory::new(robot_id.clone(), status);
        entry.battery_level = Some(robot.battery_level);
        entry.event = event.map(str::to_string);
        self.repo.create(entry).await?;

        info!(robot_id = %robot_id, status = %status, "Robot status changed");
        Ok(robot)
    }

    pub async fn update_location(&self, robot_id: &EntityId, location: Location) -> Result<Robot> {
        self.patch_robot(robot_id, json!({"location": location})).await
    }

    pub async fn raise_alert(
        &self,
        robot_id: &EntityId,
        level: AlertLevel,
        message: impl Into<String>,
    ) -> Result<Alert> {
        let alert = Alert::new(robot_id.clone(), level, message);
        let alert = self.repo.create_record(alert).await?;
        info!(robot_id = %robot_id, alert_id = %alert.id, level = %level, "Alert raised");
        Ok(alert)
    }

    /// Mark an alert resolved. Calling it again overwrites who resolved
    /// it and when.
    pub async fn resolve_alert(&self, alert_id: &EntityId, resolved_by: &str) -> Result<Alert> {
        let patch: Document = document(json!({
            "resolved": true,
            "resolved_by": resolved_by,
            "resolved_at": Utc::now(),
        }))?;
        let alert: Alert = self.repo.update_fields(alert_id, patch).await?;
        info!(alert_id = %alert_id, resolved_by, "Alert resolved");
        Ok(alert)
    }

    pub async fn issue_command(
        &self,
        robot_id: &EntityId,
        user_id: Option<&EntityId>,
        command_type: &str,
        detail: Value,
    ) -> Result<CommandHistory> {
        let mut command = CommandHistory::new(robot_id.clone(), command_type, detail);
        command.user_id = user_id.cloned();
        let command = self.repo.create_record(command).await?;

        info!(robot_id = %robot_id, command = command_type, "Command issued");
        Ok(command)
    }

    pub async fn add_camera(
        &self,
        robot_id: &EntityId,
        name: &str,
        stream_url: &str,
        stream_type: StreamType,
        quality: StreamQuality,
    ) -> Result<Camera> {
        let camera = Camera::new(robot_id.clone(), name, stream_url).with_stream(stream_type, quality);
        self.repo.create_record(camera).await
    }

    pub async fn health_summary(&self, robot_id: &EntityId) -> Result<HealthSummary> {
        let robot: Robot = self.repo.require(robot_id).await?;
        let open_alerts = self.repo.alerts_for_robot(robot_id, Some(false)).await?.len();
        let recent_readings = self
            .repo
            .sensor_history(robot_id, Some(RECENT_READINGS))
            .await?;

        let now = Utc::now();
        Ok(HealthSummary {
            health_score: robot.health_score(now),
            needs_maintenance: robot.needs_maintenance(now),
            open_alerts,
            recent_readings,
            robot,
        })
    }
}
