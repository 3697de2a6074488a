//! Generic row operations shared by every fleet table

use domain::{Document, EntityType};
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A SeaORM entity backing one record kind
pub trait FleetTable: EntityTrait {
    type Active: ActiveModelTrait<Entity = Self> + ActiveModelBehavior + From<Self::Model> + Send;

    const ENTITY_TYPE: EntityType;

    fn id_column() -> Self::Column;

    /// Column referencing the owning parent
    fn parent_column() -> Option<Self::Column>;

    fn created_column() -> Self::Column;
}

fn model_from_document<M: DeserializeOwned>(fields: &Document) -> Result<M, DbErr> {
    serde_json::from_value(Value::Object(fields.clone())).map_err(|e| DbErr::Json(e.to_string()))
}

fn model_to_document<M: Serialize>(model: &M) -> Result<Document, DbErr> {
    match serde_json::to_value(model) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(DbErr::Json(format!("row serialized to {other}"))),
        Err(e) => Err(DbErr::Json(e.to_string())),
    }
}

pub(crate) async fn insert<T, C>(db: &C, fields: &Document) -> Result<(), DbErr>
where
    T: FleetTable,
    T::Model: DeserializeOwned + IntoActiveModel<T::Active>,
    C: ConnectionTrait,
{
    let model: T::Model = model_from_document(fields)?;
    let active = T::Active::from(model).reset_all();
    T::insert(active).exec_without_returning(db).await?;
    Ok(())
}

pub(crate) async fn get<T, C>(db: &C, id: &str) -> Result<Option<Document>, DbErr>
where
    T: FleetTable,
    T::Model: Serialize,
    C: ConnectionTrait,
{
    let row = T::find().filter(T::id_column().eq(id)).one(db).await?;
    row.as_ref().map(model_to_document).transpose()
}

pub(crate) async fn list_by_parent<T, C>(
    db: &C,
    parent_id: &str,
    limit: Option<usize>,
) -> Result<Vec<Document>, DbErr>
where
    T: FleetTable,
    T::Model: Serialize,
    C: ConnectionTrait,
{
    let parent_column = T::parent_column().ok_or_else(|| {
        DbErr::Custom(format!("{} has no parent column", T::ENTITY_TYPE))
    })?;

    let mut select = T::find().filter(parent_column.eq(parent_id));
    select = if T::ENTITY_TYPE.newest_first() {
        select
            .order_by_desc(T::created_column())
            .order_by_desc(T::id_column())
    } else {
        select.order_by_asc(T::id_column())
    };
    if let Some(limit) = limit {
        select = select.limit(limit as u64);
    }

    let rows = select.all(db).await?;
    rows.iter().map(model_to_document).collect()
}

pub(crate) async fn list_all<T, C>(db: &C) -> Result<Vec<Document>, DbErr>
where
    T: FleetTable,
    T::Model: Serialize,
    C: ConnectionTrait,
{
    let rows = T::find()
        .order_by_asc(T::created_column())
        .order_by_asc(T::id_column())
        .all(db)
        .await?;
    rows.iter().map(model_to_document).collect()
}

/// Read-merge-write inside one transaction. Returns `false` if the row is missing.
pub(crate) async fn update_fields<T, C>(db: &C, id: &str, fields: &Document) -> Result<bool, DbErr>
where
    T: FleetTable,
    T::Model: Serialize + DeserializeOwned + IntoActiveModel<T::Active>,
    C: TransactionTrait,
{
    let txn = db.begin().await?;

    let Some(current) = T::find().filter(T::id_column().eq(id)).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(false);
    };

    let mut doc = model_to_document(&current)?;
    for (key, value) in fields {
        doc.insert(key.clone(), value.clone());
    }
    let merged: T::Model = model_from_document(&doc)?;
    T::update(T::Active::from(merged).reset_all())
        .exec(&txn)
        .await?;

    txn.commit().await?;
    Ok(true)
}

pub(crate) async fn delete<T, C>(db: &C, id: &str) -> Result<bool, DbErr>
where
    T: FleetTable,
    C: ConnectionTrait,
{
    let result = T::delete_many()
        .filter(T::id_column().eq(id))
        .exec(db)
        .await?;
    Ok(result.rows_affected > 0)
}
