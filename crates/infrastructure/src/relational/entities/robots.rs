use super::super::table::FleetTable;
use domain::EntityType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "robots")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub project_id: Option<String>,
    pub name: String,
    pub model: String,
    pub status: String,
    pub battery_level: f64,
    pub signal_strength: Option<f64>,
    pub ping_ms: Option<i32>,
    pub location: Option<Json>,
    pub manufacturer: Option<String>,
    pub serial_number: Option<String>,
    pub firmware_version: Option<String>,
    pub total_operating_hours: f64,
    pub last_maintenance_at: Option<DateTimeUtc>,
    pub next_maintenance_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cameras::Entity")]
    Cameras,
    #[sea_orm(has_many = "super::sensor_data::Entity")]
    SensorData,
    #[sea_orm(has_many = "super::alerts::Entity")]
    Alerts,
    #[sea_orm(has_many = "super::maintenance_records::Entity")]
    MaintenanceRecords,
    #[sea_orm(has_many = "super::command_history::Entity")]
    CommandHistory,
    #[sea_orm(has_many = "super::robot_status_history::Entity")]
    RobotStatusHistory,
}

impl Related<super::cameras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cameras.def()
    }
}

impl Related<super::sensor_data::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SensorData.def()
    }
}

impl Related<super::alerts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Alerts.def()
    }
}

impl Related<super::maintenance_records::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaintenanceRecords.def()
    }
}

impl Related<super::command_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CommandHistory.def()
    }
}

impl Related<super::robot_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RobotStatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl FleetTable for Entity {
    type Active = ActiveModel;
    const ENTITY_TYPE: EntityType = EntityType::Robot;

    fn id_column() -> Column {
        Column::Id
    }

    fn parent_column() -> Option<Column> {
        None
    }

    fn created_column() -> Column {
        Column::CreatedAt
    }
}
