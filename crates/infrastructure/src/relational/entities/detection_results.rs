use super::super::table::FleetTable;
use domain::EntityType;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "detection_results")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub camera_id: String,
    pub class_label: String,
    pub confidence: f64,
    pub bbox: Json,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::cameras::Entity",
        from = "Column::CameraId",
        to = "super::cameras::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Camera,
}

impl Related<super::cameras::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Camera.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl FleetTable for Entity {
    type Active = ActiveModel;
    const ENTITY_TYPE: EntityType = EntityType::DetectionResult;

    fn id_column() -> Column {
        Column::Id
    }

    fn parent_column() -> Option<Column> {
        Some(Column::CameraId)
    }

    fn created_column() -> Column {
        Column::CreatedAt
    }
}
