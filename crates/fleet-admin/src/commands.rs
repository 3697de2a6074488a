//! Command implementations, shared by the binary and its tests

use anyhow::{Context, Result};
use application::{
    DashboardService, DashboardStats, FleetRepository, HealthSummary, RobotService, copy_fleet,
    seed_dataset,
};
use domain::{BatteryAlertPolicy, EntityId, EntityStore, Robot};
use infrastructure::{DummyDataGenerator, GeneratorOptions};
use std::fmt::Write;
use std::sync::Arc;
use tracing::info;

pub async fn seed(store: Arc<dyn EntityStore>, options: &GeneratorOptions) -> Result<usize> {
    info!(robots = options.robots, hours = options.sensor_hours, "Generating dummy fleet");
    let dataset = DummyDataGenerator::new().generate(options);

    let repo = FleetRepository::new(store);
    let written = seed_dataset(&repo, &dataset)
        .await
        .context("Failed to store generated fleet")?;
    Ok(written)
}

pub async fn stats(store: Arc<dyn EntityStore>) -> Result<DashboardStats> {
    let service = DashboardService::new(FleetRepository::new(store));
    Ok(service.stats().await?)
}

/// All robots, sorted by name
pub async fn robots(store: Arc<dyn EntityStore>) -> Result<Vec<Robot>> {
    let mut robots: Vec<Robot> = FleetRepository::new(store).list_all().await?;
    robots.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(robots)
}

fn parse_robot_id(raw: &str) -> Result<EntityId> {
    raw.parse()
        .with_context(|| format!("'{raw}' is not a valid robot id"))
}

pub async fn health(store: Arc<dyn EntityStore>, robot_id: &str) -> Result<HealthSummary> {
    let robot_id = parse_robot_id(robot_id)?;
    let service = RobotService::new(FleetRepository::new(store));
    Ok(service.health_summary(&robot_id).await?)
}

/// Report a new battery level, raising an alert per the configured policy
pub async fn battery(
    store: Arc<dyn EntityStore>,
    policy: BatteryAlertPolicy,
    robot_id: &str,
    level: f64,
) -> Result<HealthSummary> {
    let robot_id = parse_robot_id(robot_id)?;
    let service = RobotService::new(FleetRepository::new(store)).with_battery_policy(policy);
    service.update_battery(&robot_id, level).await?;
    Ok(service.health_summary(&robot_id).await?)
}

/// Copy every record from `source` into `target`
pub async fn migrate(source: Arc<dyn EntityStore>, target: Arc<dyn EntityStore>) -> Result<usize> {
    let copied = copy_fleet(&FleetRepository::new(source), &FleetRepository::new(target))
        .await
        .context("Failed to copy fleet into target store")?;
    Ok(copied)
}

pub fn robot_table(robots: &[Robot]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<36}  {:<12}  {:<12}  {:>7}",
        "ID", "NAME", "STATUS", "BATTERY"
    );
    for robot in robots {
        let _ = writeln!(
            out,
            "{:<36}  {:<12}  {:<12}  {:>6.1}%",
            robot.id.as_str(),
            robot.name,
            robot.status.as_str(),
            robot.battery_level
        );
    }
    out
}
