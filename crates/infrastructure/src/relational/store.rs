use super::entities::{
    alerts, cameras, command_history, detection_results, maintenance_records, projects, reports,
    robot_status_history, robots, sensor_data, team_members, teams, users,
};
use super::table;
use async_trait::async_trait;
use domain::{Document, DomainError, EntityId, EntityStore, EntityType, StoredRecord};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr, SqlErr};
use tracing::{debug, error, info};

/// Run a generic table operation against the table backing `$entity_type`
macro_rules! on_table {
    ($entity_type:expr, $op:ident ( $($arg:expr),* )) => {
        match $entity_type {
            EntityType::User => table::$op::<users::Entity, _>($($arg),*).await,
            EntityType::Team => table::$op::<teams::Entity, _>($($arg),*).await,
            EntityType::TeamMember => table::$op::<team_members::Entity, _>($($arg),*).await,
            EntityType::Project => table::$op::<projects::Entity, _>($($arg),*).await,
            EntityType::Report => table::$op::<reports::Entity, _>($($arg),*).await,
            EntityType::Robot => table::$op::<robots::Entity, _>($($arg),*).await,
            EntityType::Camera => table::$op::<cameras::Entity, _>($($arg),*).await,
            EntityType::DetectionResult => {
                table::$op::<detection_results::Entity, _>($($arg),*).await
            }
            EntityType::SensorData => table::$op::<sensor_data::Entity, _>($($arg),*).await,
            EntityType::CommandHistory => {
                table::$op::<command_history::Entity, _>($($arg),*).await
            }
            EntityType::RobotStatusHistory => {
                table::$op::<robot_status_history::Entity, _>($($arg),*).await
            }
            EntityType::Alert => table::$op::<alerts::Entity, _>($($arg),*).await,
            EntityType::MaintenanceRecord => {
                table::$op::<maintenance_records::Entity, _>($($arg),*).await
            }
        }
    };
}

/// Relational store: one SQLite table per record kind
pub struct SeaOrmEntityStore {
    db: DatabaseConnection,
}

impl SeaOrmEntityStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Connect and bring the schema up to date
    pub async fn connect(url: &str) -> anyhow::Result<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        options.sqlx_logging(false);
        if url.contains(":memory:") {
            // Every pooled connection would otherwise see its own empty database
            options.max_connections(1).min_connections(1);
        }

        info!(url = %url, "Connecting to SQLite");
        let db = Database::connect(options).await?;
        Migrator::up(&db, None).await?;
        info!("✅ Migrations applied");

        Ok(Self::new(db))
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn storage_error(op: &str, entity_type: EntityType, e: DbErr) -> DomainError {
        error!(op, entity_type = %entity_type, error = %e, "SQLite operation failed");
        DomainError::Storage(format!("Database error: {}", e))
    }
}

#[async_trait]
impl EntityStore for SeaOrmEntityStore {
    async fn insert(&self, record: &StoredRecord) -> Result<(), DomainError> {
        let db = &self.db;
        let fields = &record.fields;
        on_table!(record.entity_type, insert(db, fields)).map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::AlreadyExists {
                entity: record.entity_type,
                id: record.id.to_string(),
            },
            _ => Self::storage_error("insert", record.entity_type, e),
        })?;

        debug!(entity_type = %record.entity_type, id = %record.id, "Inserted row");
        Ok(())
    }

    async fn get(
        &self,
        entity_type: EntityType,
        id: &EntityId,
    ) -> Result<Option<Document>, DomainError> {
        let db = &self.db;
        let id = id.as_str();
        on_table!(entity_type, get(db, id)).map_err(|e| Self::storage_error("get", entity_type, e))
    }

    async fn list_by_parent(
        &self,
        entity_type: EntityType,
        parent_id: &EntityId,
        limit: Option<usize>,
    ) -> Result<Vec<Document>, DomainError> {
        if entity_type.is_root() {
            return Err(DomainError::NotAChild(entity_type));
        }
        let db = &self.db;
        let parent_id = parent_id.as_str();
        on_table!(entity_type, list_by_parent(db, parent_id, limit))
            .map_err(|e| Self::storage_error("list_by_parent", entity_type, e))
    }

    async fn update_fields(
        &self,
        entity_type: EntityType,
        id: &EntityId,
        fields: &Document,
    ) -> Result<bool, DomainError> {
        let db = &self.db;
        let row_id = id.as_str();
        let found = on_table!(entity_type, update_fields(db, row_id, fields))
            .map_err(|e| Self::storage_error("update_fields", entity_type, e))?;

        debug!(entity_type = %entity_type, id = %id, found, "Updated row");
        Ok(found)
    }

    async fn list_all(&self, entity_type: EntityType) -> Result<Vec<Document>, DomainError> {
        let db = &self.db;
        on_table!(entity_type, list_all(db))
            .map_err(|e| Self::storage_error("list_all", entity_type, e))
    }

    async fn delete(&self, entity_type: EntityType, id: &EntityId) -> Result<bool, DomainError> {
        let db = &self.db;
        let row_id = id.as_str();
        on_table!(entity_type, delete(db, row_id))
            .map_err(|e| Self::storage_error("delete", entity_type, e))
    }
}
