use super::super::table::FleetTable;
use domain::EntityType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cameras")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub robot_id: String,
    pub name: String,
    pub stream_url: String,
    pub stream_type: String,
    pub quality: String,
    pub is_active: bool,
    pub position: String,
    pub last_accessed_at: Option<DateTimeUtc>,
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
    #[sea_orm(has_many = "super::detection_results::Entity")]
    DetectionResults,
}

impl Related<super::robots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Robot.def()
    }
}

impl Related<super::detection_results::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DetectionResults.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl FleetTable for Entity {
    type Active = ActiveModel;
    const ENTITY_TYPE: EntityType = EntityType::Camera;

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
