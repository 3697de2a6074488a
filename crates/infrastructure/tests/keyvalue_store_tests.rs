//! Integration tests for KeyValueEntityStore over the in-memory table

use chrono::{Duration, Utc};
use domain::keys::{self, ENTITY_TYPE_ATTRIBUTE, PARTITION_KEY, SORT_KEY};
use domain::{
    Alert, AlertLevel, BoundingBox, Camera, CommandHistory, DetectionResult, DomainError, Entity,
    EntityId, EntityStore, EntityType, Robot, StoredRecord, document,
};
use infrastructure::{KeyValueEntityStore, KeyValueTable, MemoryTable};
use serde_json::{Value, json};

fn create_test_store() -> KeyValueEntityStore<MemoryTable> {
    KeyValueEntityStore::new(MemoryTable::new())
}

fn record<E: Entity>(entity: &E) -> StoredRecord {
    StoredRecord::from_entity(entity).unwrap()
}

fn command_at(robot_id: &EntityId, command_type: &str, minutes_ago: i64) -> CommandHistory {
    let at = Utc::now() - Duration::minutes(minutes_ago);
    let mut command = CommandHistory::new(robot_id.clone(), command_type, json!({}));
    command.id = EntityId::generate_at(at);
    command.set_timestamps(at, at);
    command
}

#[tokio::test]
async fn test_insert_writes_key_attributes() {
    let store = create_test_store();
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    let alert = Alert::new(robot.id.clone(), AlertLevel::Warning, "Battery low: 15%");

    store.insert(&record(&robot)).await.unwrap();
    store.insert(&record(&alert)).await.unwrap();

    let key = keys::primary_key(EntityType::Alert, &alert.id);
    let item = store.table().get_item(&key).await.unwrap().unwrap();
    assert_eq!(item[PARTITION_KEY], json!(format!("ALERT#{}", alert.id)));
    assert_eq!(item[SORT_KEY], json!(format!("ALERT#{}", alert.id)));
    assert_eq!(item["GSI3PK"], json!(format!("ROBOT#{}", robot.id)));
    assert_eq!(item["GSI3SK"], json!(format!("ALERT#{}", alert.id)));
    assert_eq!(item[ENTITY_TYPE_ATTRIBUTE], json!("ALERT"));
}

#[tokio::test]
async fn test_log_sort_key_carries_creation_time() {
    let store = create_test_store();
    let robot_id = EntityId::generate();
    let mut command = command_at(&robot_id, "stop", 0);
    command.id = EntityId::new("cmd-1").unwrap();
    store.insert(&record(&command)).await.unwrap();

    let key = keys::primary_key(EntityType::CommandHistory, &command.id);
    let item = store.table().get_item(&key).await.unwrap().unwrap();
    let stamp = command.created_at.format("%Y-%m-%dT%H:%M:%S%.9fZ");
    assert_eq!(item["GSI3SK"], json!(format!("COMMAND#{stamp}#cmd-1")));
}

#[tokio::test]
async fn test_insert_existing_id_rejected() {
    let store = create_test_store();
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
async fn test_get_strips_key_attributes() {
    let store = create_test_store();
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    store.insert(&record(&robot)).await.unwrap();

    let doc = store.get(EntityType::Robot, &robot.id).await.unwrap().unwrap();
    assert!(!doc.contains_key(PARTITION_KEY));
    assert!(!doc.contains_key("GSI3PK"));
    assert!(!doc.contains_key(ENTITY_TYPE_ATTRIBUTE));
    assert_eq!(Robot::from_document(doc).unwrap(), robot);
}

#[tokio::test]
async fn test_child_without_parent_rejected() {
    let store = create_test_store();
    let mut orphan = record(&Alert::new(EntityId::generate(), AlertLevel::Info, "hello"));
    orphan.parent_id = None;

    let err = store.insert(&orphan).await.unwrap_err();
    assert_eq!(err, DomainError::MissingParent(EntityType::Alert));
    assert!(store.table().is_empty().await);
}

#[tokio::test]
async fn test_list_by_parent_newest_first_with_limit() {
    let store = create_test_store();
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    let other = Robot::new("Scout-002", "ITR-2024-A");

    for (command_type, minutes_ago) in [("stop", 30), ("move_to", 5), ("start_patrol", 15)] {
        store.insert(&record(&command_at(&robot.id, command_type, minutes_ago))).await.unwrap();
    }
    store.insert(&record(&command_at(&other.id, "return_home", 1))).await.unwrap();
    // Same parent partition, different kind
    store
        .insert(&record(&Alert::new(robot.id.clone(), AlertLevel::Info, "hello")))
        .await
        .unwrap();

    let docs = store
        .list_by_parent(EntityType::CommandHistory, &robot.id, None)
        .await
        .unwrap();
    let types: Vec<_> = docs
        .into_iter()
        .map(|doc| CommandHistory::from_document(doc).unwrap().command_type)
        .collect();
    assert_eq!(types, ["move_to", "start_patrol", "stop"]);

    let limited = store
        .list_by_parent(EntityType::CommandHistory, &robot.id, Some(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
    assert_eq!(limited[0]["command_type"], json!("move_to"));
}

#[tokio::test]
async fn test_list_by_parent_skips_mismatched_item() {
    let store = create_test_store();
    let robot_id = EntityId::generate();
    let alert = Alert::new(robot_id.clone(), AlertLevel::Error, "Motor overheating");
    store.insert(&record(&alert)).await.unwrap();

    // An item sitting in the alert range of the index but tagged as another kind
    let stray = document(json!({
        "PK": "ALERT#stray",
        "SK": "ALERT#stray",
        "GSI3PK": format!("ROBOT#{robot_id}"),
        "GSI3SK": "ALERT#stray",
        "entity_type": "CAMERA",
        "message": "not an alert",
    }))
    .unwrap();
    assert!(store.table().put_item(stray).await.unwrap());

    let docs = store
        .list_by_parent(EntityType::Alert, &robot_id, None)
        .await
        .unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["id"], Value::String(alert.id.to_string()));
}

#[tokio::test]
async fn test_update_fields() {
    let store = create_test_store();
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    store.insert(&record(&robot)).await.unwrap();

    let fields = document(json!({"battery_level": 18.0})).unwrap();
    assert!(store.update_fields(EntityType::Robot, &robot.id, &fields).await.unwrap());

    let doc = store.get(EntityType::Robot, &robot.id).await.unwrap().unwrap();
    assert_eq!(doc["battery_level"], json!(18.0));

    let missing = EntityId::generate();
    assert!(!store.update_fields(EntityType::Robot, &missing, &fields).await.unwrap());
}

#[tokio::test]
async fn test_update_rejects_key_attributes() {
    let store = create_test_store();
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    store.insert(&record(&robot)).await.unwrap();

    let fields = document(json!({"GSI3PK": "ROBOT#other"})).unwrap();
    let err = store
        .update_fields(EntityType::Robot, &robot.id, &fields)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::ImmutableField("GSI3PK".to_string()));
}

#[tokio::test]
async fn test_list_all_and_delete() {
    let store = create_test_store();
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    let alert = Alert::new(robot.id.clone(), AlertLevel::Info, "hello");
    store.insert(&record(&robot)).await.unwrap();
    store.insert(&record(&alert)).await.unwrap();

    assert_eq!(store.list_all(EntityType::Robot).await.unwrap().len(), 1);
    assert_eq!(store.list_all(EntityType::Alert).await.unwrap().len(), 1);

    assert!(store.delete(EntityType::Alert, &alert.id).await.unwrap());
    assert!(!store.delete(EntityType::Alert, &alert.id).await.unwrap());
    assert!(store.get(EntityType::Robot, &robot.id).await.unwrap().is_some());
    assert!(store.list_all(EntityType::Alert).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_removes_owned_items() {
    let store = create_test_store();
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    let other = Robot::new("Scout-002", "ITR-2024-A");
    let camera = Camera::new(robot.id.clone(), "Front", "rtsp://camera.local:8554/stream1");
    let detection = DetectionResult::new(
        camera.id.clone(),
        "person",
        0.9,
        BoundingBox {
            x: 10.0,
            y: 10.0,
            width: 50.0,
            height: 80.0,
        },
    );
    let alert = Alert::new(robot.id.clone(), AlertLevel::Info, "hello");
    let kept = Alert::new(other.id.clone(), AlertLevel::Info, "still here");
    for item in [
        record(&robot),
        record(&other),
        record(&camera),
        record(&detection),
        record(&alert),
        record(&kept),
    ] {
        store.insert(&item).await.unwrap();
    }

    assert!(store.delete(EntityType::Robot, &robot.id).await.unwrap());

    assert!(store.get(EntityType::Camera, &camera.id).await.unwrap().is_none());
    assert!(store.get(EntityType::DetectionResult, &detection.id).await.unwrap().is_none());
    assert!(store.get(EntityType::Alert, &alert.id).await.unwrap().is_none());
    assert!(
        store
            .list_by_parent(EntityType::Camera, &robot.id, None)
            .await
            .unwrap()
            .is_empty()
    );
    assert_eq!(store.list_all(EntityType::Robot).await.unwrap().len(), 1);
    assert_eq!(store.list_all(EntityType::Alert).await.unwrap().len(), 1);
    assert_eq!(store.table().len().await, 2);
}
