//! Dashboard, report and seeding workflows

use application::{DashboardService, FleetRepository, ReportService, seed_dataset};
use domain::{
    BoundingBox, Camera, DetectionResult, DomainError, EntityId, Project, Report, Robot,
    RobotStatus, SensorData, User, UserRole,
};
use infrastructure::{
    DummyDataGenerator, GeneratorOptions, KeyValueEntityStore, MemoryTable, SeaOrmEntityStore,
};
use std::sync::Arc;

fn memory_repo() -> FleetRepository {
    FleetRepository::new(Arc::new(KeyValueEntityStore::new(MemoryTable::new())))
}

fn bbox() -> BoundingBox {
    BoundingBox {
        x: 10.0,
        y: 20.0,
        width: 100.0,
        height: 80.0,
    }
}

async fn robot_with_camera(repo: &FleetRepository, status: RobotStatus, battery: f64) -> (Robot, Camera) {
    let robot = Robot::new("Scout-001", "ITR-2024-A")
        .with_status(status)
        .with_battery(battery);
    let robot = repo.create_record(robot).await.unwrap();
    let camera = Camera::new(robot.id.clone(), "front", "rtsp://camera.local:8554/stream1");
    let camera = repo.create_record(camera).await.unwrap();
    (robot, camera)
}

async fn detect(repo: &FleetRepository, camera: &Camera, labels: &[&str]) {
    for label in labels {
        let detection = DetectionResult::new(camera.id.clone(), *label, 0.9, bbox());
        repo.create(detection).await.unwrap();
    }
}

#[tokio::test]
async fn test_dashboard_empty_fleet() {
    let stats = DashboardService::new(memory_repo()).stats().await.unwrap();

    assert_eq!(stats.total_robots, 0);
    assert_eq!(stats.average_battery, None);
    assert_eq!(stats.average_temperature, None);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let repo = memory_repo();
    let (online, camera) = robot_with_camera(&repo, RobotStatus::Online, 80.0).await;
    let (offline, _) = robot_with_camera(&repo, RobotStatus::Offline, 40.0).await;
    detect(&repo, &camera, &["person", "sign", "person"]).await;

    repo.create(SensorData::new(online.id.clone()).with_environment(20.0, 40.0, 1010.0))
        .await
        .unwrap();
    repo.create(SensorData::new(offline.id.clone()).with_environment(24.0, 60.0, 1012.0))
        .await
        .unwrap();
    // Battery-only reading does not count towards the environment averages
    repo.create(SensorData::new(offline.id.clone()).with_battery(39.0))
        .await
        .unwrap();

    let stats = DashboardService::new(repo).stats().await.unwrap();
    assert_eq!(stats.total_robots, 2);
    assert_eq!(stats.online_robots, 1);
    assert_eq!(stats.average_battery, Some(60.0));
    assert_eq!(stats.total_cameras, 2);
    assert_eq!(stats.active_cameras, 2);
    assert_eq!(stats.total_detections, 3);
    assert_eq!(stats.sensor_readings, 3);
    assert_eq!(stats.average_temperature, Some(22.0));
    assert_eq!(stats.average_humidity, Some(50.0));
}

#[tokio::test]
async fn test_create_report_summarises_cameras() {
    let repo = memory_repo();
    let author = repo
        .create_record(User::new("Min-jun", "Kim", "author@company.com", UserRole::Operator))
        .await
        .unwrap();
    let project = repo
        .create_record(Project::new(author.id.clone(), "Campus survey"))
        .await
        .unwrap();
    let (_, front) = robot_with_camera(&repo, RobotStatus::Online, 80.0).await;
    let (_, rear) = robot_with_camera(&repo, RobotStatus::Online, 80.0).await;
    detect(&repo, &front, &["person", "sign"]).await;
    detect(&repo, &rear, &["person"]).await;

    let service = ReportService::new(repo);
    let report = service
        .create_report(
            &project.id,
            &author.id,
            "Daily summary",
            "Survey results",
            &[front.id.clone(), rear.id.clone()],
        )
        .await
        .unwrap();

    assert_eq!(report.detection_summary.total, 3);
    assert_eq!(report.detection_summary.by_class.get("person"), Some(&2));
    assert_eq!(report.detection_summary.by_class.get("sign"), Some(&1));

    let reports: Vec<Report> = service.reports_for_project(&project.id).await.unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id, report.id);
}

#[tokio::test]
async fn test_create_report_requires_author_and_project() {
    let repo = memory_repo();
    let author = repo
        .create_record(User::new("Min-jun", "Kim", "author@company.com", UserRole::Operator))
        .await
        .unwrap();
    let service = ReportService::new(repo);

    let err = service
        .create_report(&EntityId::generate(), &author.id, "t", "c", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ParentNotFound { .. }), "{err}");

    let err = service
        .create_report(&EntityId::generate(), &EntityId::generate(), "t", "c", &[])
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }), "{err}");
}

#[tokio::test]
async fn test_seed_generated_dataset_into_memory() {
    let repo = memory_repo();
    let options = GeneratorOptions {
        robots: 3,
        sensor_hours: 1,
        ..GeneratorOptions::default()
    };
    let dataset = DummyDataGenerator::new().generate(&options);

    let written = seed_dataset(&repo, &dataset).await.unwrap();
    assert_eq!(written, dataset.record_count());

    let robots: Vec<Robot> = repo.list_all().await.unwrap();
    assert_eq!(robots.len(), 3);
    for robot in &robots {
        let readings = repo.sensor_history(&robot.id, None).await.unwrap();
        assert_eq!(readings.len(), 13);
        assert!(readings.windows(2).all(|w| w[0].created_at > w[1].created_at));
    }
}

#[tokio::test]
async fn test_seed_generated_dataset_into_sqlite() {
    let store = SeaOrmEntityStore::connect("sqlite::memory:").await.unwrap();
    let repo = FleetRepository::new(Arc::new(store));
    let options = GeneratorOptions {
        robots: 2,
        sensor_hours: 1,
        ..GeneratorOptions::default()
    };
    let dataset = DummyDataGenerator::new().generate(&options);

    seed_dataset(&repo, &dataset).await.unwrap();

    let stats = DashboardService::new(repo.clone()).stats().await.unwrap();
    assert_eq!(stats.total_robots, 2);
    assert_eq!(stats.total_cameras, dataset.cameras.len());
    assert_eq!(stats.total_detections, dataset.detections.len());

    let reports = repo.reports_for_project(&dataset.projects[0].id).await.unwrap();
    assert_eq!(reports.len(), 1);
}
