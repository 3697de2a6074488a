use super::super::table::FleetTable;
use domain::EntityType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "maintenance_records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub robot_id: String,
    pub maintenance_type: String,
    pub status: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub start_date: DateTimeUtc,
    pub end_date: Option<DateTimeUtc>,
    pub technician: Option<String>,
    pub cost: Option<f64>,
    pub parts_replaced: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::robots::Entity",
        from = "Column::RobotId",
        to = "super::robots::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Robot,
}

impl Related<super::robots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Robot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl FleetTable for Entity {
    type Active = ActiveModel;
    const ENTITY_TYPE: EntityType = EntityType::MaintenanceRecord;

    fn id_column() -> Column {
        Column::Id
    }

    fn parent_column() -> Option<Column> {
        Some(Column::RobotId)
    }

    fn created_column() -> Column {
        Column::CreatedAt
    }
}
