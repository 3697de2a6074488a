use crate::repository::FleetRepository;
use domain::{Alert, Result, Robot};
use serde::Serialize;
use tracing::debug;

/// Readings per robot that feed the environment averages
const READINGS_PER_ROBOT: usize = 100;

/// Fleet-wide overview numbers
///
/// Averages are `None` when no record carries the value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_robots: usize,
    pub online_robots: usize,
    pub average_battery: Option<f64>,
    pub total_cameras: usize,
    pub active_cameras: usize,
    pub total_detections: usize,
    pub sensor_readings: usize,
    pub average_temperature: Option<f64>,
    pub average_humidity: Option<f64>,
    pub open_alerts: usize,
}

fn average(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[derive(Clone)]
pub struct DashboardService {
    repo: FleetRepository,
}

impl DashboardService {
    pub fn new(repo: FleetRepository) -> Self {
        Self { repo }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        let robots: Vec<Robot> = self.repo.list_all().await?;
        let batteries: Vec<f64> = robots.iter().map(|r| r.battery_level).collect();

        let mut stats = DashboardStats {
            total_robots: robots.len(),
            online_robots: robots.iter().filter(|r| r.is_online()).count(),
            average_battery: average(&batteries),
            ..DashboardStats::default()
        };

        let mut temperatures = Vec::new();
        let mut humidities = Vec::new();

        for robot in &robots {
            let cameras = self.repo.cameras_for_robot(&robot.id).await?;
            stats.total_cameras += cameras.len();
            stats.active_cameras += cameras.iter().filter(|c| c.is_active).count();
            for camera in &cameras {
                stats.total_detections += self.repo.detections_for_camera(&camera.id, None).await?.len();
            }

            let readings = self
                .repo
                .sensor_history(&robot.id, Some(READINGS_PER_ROBOT))
                .await?;
            stats.sensor_readings += readings.len();
            temperatures.extend(readings.iter().filter_map(|r| r.temperature));
            humidities.extend(readings.iter().filter_map(|r| r.humidity));

            let alerts: Vec<Alert> = self.repo.alerts_for_robot(&robot.id, Some(false)).await?;
            stats.open_alerts += alerts.len();
        }

        stats.average_temperature = average(&temperatures);
        stats.average_humidity = average(&humidities);

        debug!(robots = stats.total_robots, readings = stats.sensor_readings, "Dashboard stats computed");
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_nothing_is_none() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[10.0, 20.0]), Some(15.0));
    }
}
