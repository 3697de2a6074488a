//! Storage failures reach callers unchanged

use application::{DashboardService, FleetRepository, RobotService};
use async_trait::async_trait;
use domain::{
    Document, DomainError, EntityId, EntityStore, EntityType, Result, Robot, StoredRecord,
};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub Store {}

    #[async_trait]
    impl EntityStore for Store {
        async fn insert(&self, record: &StoredRecord) -> Result<()>;
        async fn get(&self, entity_type: EntityType, id: &EntityId) -> Result<Option<Document>>;
        async fn list_by_parent(
            &self,
            entity_type: EntityType,
            parent_id: &EntityId,
            limit: Option<usize>,
        ) -> Result<Vec<Document>>;
        async fn update_fields(
            &self,
            entity_type: EntityType,
            id: &EntityId,
            fields: &Document,
        ) -> Result<bool>;
        async fn list_all(&self, entity_type: EntityType) -> Result<Vec<Document>>;
        async fn delete(&self, entity_type: EntityType, id: &EntityId) -> Result<bool>;
    }
}

fn unavailable() -> DomainError {
    DomainError::Storage("connection refused".to_string())
}

#[tokio::test]
async fn test_insert_failure_propagates() {
    let mut store = MockStore::new();
    store.expect_insert().times(1).returning(|_| Err(unavailable()));
    let repo = FleetRepository::new(Arc::new(store));

    let err = repo.create(Robot::new("Scout-001", "ITR-2024-A")).await.unwrap_err();
    assert_eq!(err, unavailable());
}

#[tokio::test]
async fn test_invalid_record_never_reaches_store() {
    let mut store = MockStore::new();
    store.expect_insert().never();
    let repo = FleetRepository::new(Arc::new(store));

    let err = repo
        .create(Robot::new("", "ITR-2024-A"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidEntity { .. }), "{err}");
}

#[tokio::test]
async fn test_lookup_failure_propagates_from_service() {
    let mut store = MockStore::new();
    store.expect_get().returning(|_, _| Err(unavailable()));
    store.expect_update_fields().never();
    let service = RobotService::new(FleetRepository::new(Arc::new(store)));

    let err = service
        .update_battery(&EntityId::generate(), 50.0)
        .await
        .unwrap_err();
    assert_eq!(err, unavailable());
}

#[tokio::test]
async fn test_update_failure_propagates() {
    let robot = Robot::new("Scout-001", "ITR-2024-A");
    let doc = domain::Entity::to_document(&robot).unwrap();

    let mut store = MockStore::new();
    store
        .expect_get()
        .withf(|entity_type, _| *entity_type == EntityType::Robot)
        .returning(move |_, _| Ok(Some(doc.clone())));
    store
        .expect_update_fields()
        .times(1)
        .returning(|_, _, _| Err(unavailable()));
    store.expect_insert().never();
    let service = RobotService::new(FleetRepository::new(Arc::new(store)));

    let err = service.update_battery(&robot.id, 5.0).await.unwrap_err();
    assert_eq!(err, unavailable());
}

#[tokio::test]
async fn test_listing_failure_propagates_from_dashboard() {
    let mut store = MockStore::new();
    store.expect_list_all().returning(|_| Err(unavailable()));
    let service = DashboardService::new(FleetRepository::new(Arc::new(store)));

    let err = service.stats().await.unwrap_err();
    assert_eq!(err, unavailable());
}
