//! Integration tests for SeaOrmEntityStore
//!
//! Each test runs against a fresh in-memory SQLite database with the
//! migrations applied.

use chrono::{Duration, Utc};
use domain::{
    Camera, DomainError, Entity, EntityId, EntityStore, EntityType, Location, Robot, RobotStatus,
    SensorData, StoredRecord, document,
};
use infrastructure::SeaOrmEntityStore;
use serde_json::json;

async fn create_test_store() -> SeaOrmEntityStore {
    SeaOrmEntityStore::connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite")
}

fn record<E: Entity>(entity: &E) -> StoredRecord {
    StoredRecord::from_entity(entity).unwrap()
}

fn reading_at(robot_id: &EntityId, minutes_ago: i64) -> SensorData {
    let at = Utc::now() - Duration::minutes(minutes_ago);
    let mut reading = SensorData::new(robot_id.clone()).with_environment(21.5, 45.0, 1013.0);
    reading.id = EntityId::generate_at(at);
    reading.set_timestamps(at, at);
    reading
}

#[tokio::test]
async fn test_insert_and_get_robot() {
    let store = create_test_store().await;
    let robot = Robot::new("Scout-001", "ITR-2024-A")
        .with_status(RobotStatus::Online)
        .with_battery(87.5)
        .with_location(Location::geographic(37.55, 126.98));

    store.insert(&record(&robot)).await.unwrap();

    let doc = store
        .get(EntityType::Robot, &robot.id)
        .await
        .unwrap()
        .expect("robot should exist");
    let loaded = Robot::from_document(doc).unwrap();
    assert_eq!(loaded.name, "Scout-001");
    assert_eq!(loaded.status, RobotStatus::Online);
    assert_eq!(loaded.location, robot.location);
}

#[tokio::test]
async fn test_insert_existing_id_rejected() {
    let store = create_test_store().await;
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    store.insert(&record(&robot)).await.unwrap();

    let mut twin = robot.clone();
    twin.name = "Scout-999".to_string();
    let err = store.insert(&record(&twin)).await.unwrap_err();
    assert_eq!(
        err,
        DomainError::AlreadyExists {
            entity: EntityType::Robot,
            id: robot.id.to_string(),
        }
    );

    let doc = store.get(EntityType::Robot, &robot.id).await.unwrap().unwrap();
    assert_eq!(doc["name"], json!("Scout-001"));
}

#[tokio::test]
async fn test_get_missing_returns_none() {
    let store = create_test_store().await;
    let missing = EntityId::generate();

    assert!(store.get(EntityType::Robot, &missing).await.unwrap().is_none());
    assert!(store.get(EntityType::Alert, &missing).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_by_parent_scoped_and_newest_first() {
    let store = create_test_store().await;
    let robot_a = Robot::new("Scout-001", "ITR-2024-A");
    let robot_b = Robot::new("Scout-002", "ITR-2024-A");
    store.insert(&record(&robot_a)).await.unwrap();
    store.insert(&record(&robot_b)).await.unwrap();

    for minutes_ago in [30, 10, 20] {
        store.insert(&record(&reading_at(&robot_a.id, minutes_ago))).await.unwrap();
    }
    store.insert(&record(&reading_at(&robot_b.id, 5))).await.unwrap();

    let docs = store
        .list_by_parent(EntityType::SensorData, &robot_a.id, None)
        .await
        .unwrap();
    let readings: Vec<SensorData> = docs
        .into_iter()
        .map(|doc| SensorData::from_document(doc).unwrap())
        .collect();

    assert_eq!(readings.len(), 3);
    assert!(readings.iter().all(|r| r.robot_id == robot_a.id));
    assert!(readings.windows(2).all(|w| w[0].created_at > w[1].created_at));

    let limited = store
        .list_by_parent(EntityType::SensorData, &robot_a.id, Some(2))
        .await
        .unwrap();
    assert_eq!(limited.len(), 2);
}

#[tokio::test]
async fn test_list_by_parent_rejects_root_type() {
    let store = create_test_store().await;

    let err = store
        .list_by_parent(EntityType::Robot, &EntityId::generate(), None)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::NotAChild(EntityType::Robot));
}

#[tokio::test]
async fn test_update_fields() {
    let store = create_test_store().await;
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    store.insert(&record(&robot)).await.unwrap();

    let fields = document(json!({"battery_level": 42.0, "status": "charging"})).unwrap();
    let found = store
        .update_fields(EntityType::Robot, &robot.id, &fields)
        .await
        .unwrap();
    assert!(found);

    let doc = store.get(EntityType::Robot, &robot.id).await.unwrap().unwrap();
    let loaded = Robot::from_document(doc).unwrap();
    assert_eq!(loaded.battery_level, 42.0);
    assert_eq!(loaded.status, RobotStatus::Charging);
    assert_eq!(loaded.name, robot.name);
}

#[tokio::test]
async fn test_update_missing_returns_false() {
    let store = create_test_store().await;
    let fields = document(json!({"battery_level": 42.0})).unwrap();

    let found = store
        .update_fields(EntityType::Robot, &EntityId::generate(), &fields)
        .await
        .unwrap();
    assert!(!found);
}

#[tokio::test]
async fn test_child_without_parent_row_is_storage_error() {
    let store = create_test_store().await;
    let camera = Camera::new(EntityId::generate(), "front", "rtsp://camera.local:8554/stream1");

    let err = store.insert(&record(&camera)).await.unwrap_err();
    assert!(matches!(err, DomainError::Storage(_)));
}

#[tokio::test]
async fn test_delete_cascades_to_children() {
    let store = create_test_store().await;
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    let camera = Camera::new(robot.id.clone(), "front", "rtsp://camera.local:8554/stream1");
    store.insert(&record(&robot)).await.unwrap();
    store.insert(&record(&camera)).await.unwrap();

    assert!(store.delete(EntityType::Robot, &robot.id).await.unwrap());
    assert!(!store.delete(EntityType::Robot, &robot.id).await.unwrap());
    assert!(store.get(EntityType::Camera, &camera.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_all() {
    let store = create_test_store().await;
    for name in ["Scout-001", "Scout-002", "Scout-003"] {
        store.insert(&record(&Robot::new(name, "ITR-2024-B"))).await.unwrap();
    }

    let robots = store.list_all(EntityType::Robot).await.unwrap();
    assert_eq!(robots.len(), 3);
    assert!(store.list_all(EntityType::Camera).await.unwrap().is_empty());
}
