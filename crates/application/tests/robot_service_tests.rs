//! RobotService workflows over the in-memory key-value table

use application::{FleetRepository, RobotService};
use domain::{
    AlertLevel, BatteryAlertPolicy, DomainError, EntityId, Location, Robot, RobotStatus,
    SensorData, StreamQuality, StreamType,
};
use infrastructure::{KeyValueEntityStore, MemoryTable};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn create_service() -> RobotService {
    let store = Arc::new(KeyValueEntityStore::new(MemoryTable::new()));
    RobotService::new(FleetRepository::new(store))
}

async fn register(service: &RobotService, battery: f64) -> Robot {
    let robot = Robot::new("Scout-001", "ITR-2024-A")
        .with_status(RobotStatus::Online)
        .with_battery(battery);
    service.register_robot(robot).await.unwrap()
}

async fn alert_levels(service: &RobotService, robot_id: &EntityId) -> Vec<AlertLevel> {
    let mut levels: Vec<_> = service
        .repository()
        .alerts_for_robot(robot_id, None)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.level)
        .collect();
    levels.sort();
    levels
}

#[tokio::test]
async fn test_register_healthy_robot_raises_nothing() {
    let service = create_service();
    let robot = register(&service, 80.0).await;

    assert!(alert_levels(&service, &robot.id).await.is_empty());
    assert_eq!(service.online_robots().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_register_low_battery_robot_raises_alert() {
    let service = create_service();
    let robot = register(&service, 5.0).await;

    assert_eq!(alert_levels(&service, &robot.id).await, [AlertLevel::Critical]);
}

#[tokio::test]
async fn test_battery_thresholds() {
    let cases = [
        (20.0, vec![]),
        (19.9, vec![AlertLevel::Warning]),
        (10.0, vec![AlertLevel::Warning]),
        (9.9, vec![AlertLevel::Critical]),
    ];

    for (level, expected) in cases {
        let service = create_service();
        let robot = register(&service, 90.0).await;

        let updated = service.update_battery(&robot.id, level).await.unwrap();
        assert_eq!(updated.battery_level, level);
        assert_eq!(alert_levels(&service, &robot.id).await, expected, "battery {level}");
    }
}

#[tokio::test]
async fn test_battery_alert_message_includes_level() {
    let service = create_service();
    let robot = register(&service, 90.0).await;

    service.update_battery(&robot.id, 7.5).await.unwrap();

    let alerts = service.repository().alerts_for_robot(&robot.id, None).await.unwrap();
    assert_eq!(alerts.len(), 1);
    assert!(alerts[0].message.contains("7.5%"), "{}", alerts[0].message);
}

#[tokio::test]
async fn test_battery_out_of_range_rejected() {
    let service = create_service();
    let robot = register(&service, 90.0).await;

    for level in [-1.0, 100.5] {
        let err = service.update_battery(&robot.id, level).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidEntity { .. }), "{err}");
    }

    let stored = service.get_robot(&robot.id).await.unwrap().unwrap();
    assert_eq!(stored.battery_level, 90.0);
    assert!(alert_levels(&service, &robot.id).await.is_empty());
}

#[tokio::test]
async fn test_custom_battery_policy() {
    let store = Arc::new(KeyValueEntityStore::new(MemoryTable::new()));
    let service = RobotService::new(FleetRepository::new(store)).with_battery_policy(
        BatteryAlertPolicy {
            warning_below: 50.0,
            critical_below: 25.0,
        },
    );
    let robot = register(&service, 90.0).await;

    service.update_battery(&robot.id, 40.0).await.unwrap();
    assert_eq!(alert_levels(&service, &robot.id).await, [AlertLevel::Warning]);
}

#[tokio::test]
async fn test_sensor_reading_with_battery_updates_robot() {
    let service = create_service();
    let robot = register(&service, 90.0).await;

    let reading = SensorData::new(robot.id.clone())
        .with_environment(22.0, 55.0, 1012.0)
        .with_battery(15.0);
    service.record_sensor_data(reading).await.unwrap();

    let stored = service.get_robot(&robot.id).await.unwrap().unwrap();
    assert_eq!(stored.battery_level, 15.0);
    assert_eq!(alert_levels(&service, &robot.id).await, [AlertLevel::Warning]);

    let plain = SensorData::new(robot.id.clone()).with_environment(22.5, 54.0, 1011.0);
    service.record_sensor_data(plain).await.unwrap();
    let stored = service.get_robot(&robot.id).await.unwrap().unwrap();
    assert_eq!(stored.battery_level, 15.0);
}

#[tokio::test]
async fn test_sensor_reading_for_unknown_robot() {
    let service = create_service();
    let reading = SensorData::new(EntityId::generate()).with_battery(50.0);

    let err = service.record_sensor_data(reading).await.unwrap_err();
    assert!(matches!(err, DomainError::ParentNotFound { .. }), "{err}");
}

#[tokio::test]
async fn test_update_status_appends_history() {
    let service = create_service();
    let robot = register(&service, 64.0).await;

    service
        .update_status(&robot.id, RobotStatus::Charging, Some("docked"))
        .await
        .unwrap();
    // Keep the two entries in distinct milliseconds
    tokio::time::sleep(Duration::from_millis(5)).await;
    let robot_after = service
        .update_status(&robot.id, RobotStatus::Idle, None)
        .await
        .unwrap();
    assert_eq!(robot_after.status, RobotStatus::Idle);

    let history = service.repository().status_history(&robot.id, None).await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].status, RobotStatus::Idle);
    assert_eq!(history[1].status, RobotStatus::Charging);
    assert_eq!(history[1].event.as_deref(), Some("docked"));
    assert_eq!(history[1].battery_level, Some(64.0));
}

#[tokio::test]
async fn test_update_location() {
    let service = create_service();
    let robot = register(&service, 64.0).await;

    let location = Location::geographic(37.5665, 126.978);
    let updated = service.update_location(&robot.id, location).await.unwrap();
    assert_eq!(updated.location, Some(location));

    let err = service
        .update_location(&robot.id, Location::geographic(91.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidEntity { .. }), "{err}");
}

#[tokio::test]
async fn test_update_unknown_robot_is_not_found() {
    let service = create_service();

    let err = service
        .update_status(&EntityId::generate(), RobotStatus::Online, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "{err}");
}

#[tokio::test]
async fn test_resolve_alert_twice_overwrites_metadata() {
    let service = create_service();
    let robot = register(&service, 64.0).await;
    let alert = service
        .raise_alert(&robot.id, AlertLevel::Error, "Motor overheating")
        .await
        .unwrap();
    assert!(alert.is_open());

    let first = service.resolve_alert(&alert.id, "Kim Gi-sul").await.unwrap();
    let second = service.resolve_alert(&alert.id, "Lee Jeong-bi").await.unwrap();

    assert!(first.resolved && second.resolved);
    assert_eq!(second.resolved_by.as_deref(), Some("Lee Jeong-bi"));
    assert!(second.resolved_at >= first.resolved_at);

    let open = service.repository().alerts_for_robot(&robot.id, Some(false)).await.unwrap();
    assert!(open.is_empty());
}

#[tokio::test]
async fn test_issue_command() {
    let service = create_service();
    let robot = register(&service, 64.0).await;
    let operator = EntityId::generate();

    let command = service
        .issue_command(
            &robot.id,
            Some(&operator),
            "move_to",
            json!({"latitude": 37.5, "longitude": 127.0}),
        )
        .await
        .unwrap();
    assert_eq!(command.user_id, Some(operator));

    let history = service.repository().command_history(&robot.id, None).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].detail["latitude"], json!(37.5));
}

#[tokio::test]
async fn test_add_camera() {
    let service = create_service();
    let robot = register(&service, 64.0).await;

    let camera = service
        .add_camera(
            &robot.id,
            "front",
            "http://camera.local:8080/stream",
            StreamType::Http,
            StreamQuality::High,
        )
        .await
        .unwrap();
    assert_eq!(camera.stream_type, StreamType::Http);

    let cameras = service.repository().cameras_for_robot(&robot.id).await.unwrap();
    assert_eq!(cameras.len(), 1);
    assert_eq!(cameras[0].quality, StreamQuality::High);
}

#[tokio::test]
async fn test_health_summary() {
    let service = create_service();
    let robot = Robot::new("Scout-001", "ITR-2024-A")
        .with_status(RobotStatus::Error)
        .with_battery(45.0);
    let robot = service.register_robot(robot).await.unwrap();

    for i in 0..12 {
        let reading = SensorData::new(robot.id.clone()).with_environment(20.0 + i as f64, 50.0, 1010.0);
        service.record_sensor_data(reading).await.unwrap();
    }
    let alert = service
        .raise_alert(&robot.id, AlertLevel::Error, "Motor overheating")
        .await
        .unwrap();
    service.raise_alert(&robot.id, AlertLevel::Info, "Patrol done").await.unwrap();
    service.resolve_alert(&alert.id, "Kim Gi-sul").await.unwrap();

    let summary = service.health_summary(&robot.id).await.unwrap();
    // 100 - 15 (battery under 50) - 40 (error)
    assert_eq!(summary.health_score, 45.0);
    assert_eq!(summary.open_alerts, 1);
    assert_eq!(summary.recent_readings.len(), 10);
    assert!(!summary.needs_maintenance);
}

#[tokio::test]
async fn test_health_summary_unknown_robot() {
    let service = create_service();

    let err = service.health_summary(&EntityId::generate()).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "{err}");
}
