use super::super::table::FleetTable;
use domain::EntityType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "alerts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub robot_id: String,
    pub level: String,
    #[sea_orm(column_type = "Text")]
    pub message: String,
    pub resolved: bool,
    pub resolved_by: Option<String>,
    pub resolved_at: Option<DateTimeUtc>,
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
    const ENTITY_TYPE: EntityType = EntityType::Alert;

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
