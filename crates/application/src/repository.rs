//! Typed access to fleet records
//!
//! [`FleetRepository`] sits on top of any [`EntityStore`]. It is the only
//! place records are validated, stamped and checked against their owning
//! parent before they reach a backend.

use chrono::Utc;
use domain::{
    Alert, Camera, CommandHistory, DetectionResult, Document, DomainError, Entity, EntityId,
    EntityStore, MaintenanceRecord, Report, Result, RobotStatusHistory, SensorData, StoredRecord,
    Team, TeamMember, User, document,
};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Clone)]
pub struct FleetRepository {
    store: Arc<dyn EntityStore>,
}

impl FleetRepository {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn EntityStore> {
        &self.store
    }

    /// Validate, stamp and store a new record. Returns its id.
    pub async fn create<E: Entity>(&self, entity: E) -> Result<EntityId> {
        let stored = self.create_record(entity).await?;
        Ok(stored.id().clone())
    }

    /// Same as [`create`](Self::create) but hands back the stored record
    pub async fn create_record<E: Entity>(&self, mut entity: E) -> Result<E> {
        let now = Utc::now();
        entity.set_timestamps(now, now);
        self.write_new(&entity).await?;
        Ok(entity)
    }

    /// Store a record keeping its own timestamps (seeding, migrations)
    pub async fn import<E: Entity>(&self, entity: &E) -> Result<()> {
        self.write_new(entity).await
    }

    async fn write_new<E: Entity>(&self, entity: &E) -> Result<()> {
        entity.validate()?;
        self.ensure_parent_exists(entity).await?;

        let record = StoredRecord::from_entity(entity)?;
        self.store.insert(&record).await?;

        debug!(entity_type = %E::TYPE, id = %entity.id(), "Record created");
        Ok(())
    }

    async fn ensure_parent_exists<E: Entity>(&self, entity: &E) -> Result<()> {
        let (Some(parent_type), Some(parent_id)) = (E::TYPE.parent_type(), entity.parent_id())
        else {
            return Ok(());
        };

        if self.store.get(parent_type, parent_id).await?.is_none() {
            return Err(DomainError::ParentNotFound {
                entity: parent_type,
                id: parent_id.to_string(),
            });
        }
        Ok(())
    }

    pub async fn get_by_id<E: Entity>(&self, id: &EntityId) -> Result<Option<E>> {
        match self.store.get(E::TYPE, id).await? {
            Some(doc) => E::from_document(doc).map(Some),
            None => Ok(None),
        }
    }

    /// Fetch a record that must exist
    pub async fn require<E: Entity>(&self, id: &EntityId) -> Result<E> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found(E::TYPE, id))
    }

    pub async fn list_by_parent<E: Entity>(&self, parent_id: &EntityId) -> Result<Vec<E>> {
        self.list_recent_by_parent(parent_id, None).await
    }

    /// Children of one parent, capped at `limit`. Log-like kinds come
    /// back newest first.
    pub async fn list_recent_by_parent<E: Entity>(
        &self,
        parent_id: &EntityId,
        limit: Option<usize>,
    ) -> Result<Vec<E>> {
        let docs = self.store.list_by_parent(E::TYPE, parent_id, limit).await?;
        let records = Self::decode_all::<E>(docs);

        Ok(records
            .into_iter()
            .filter(|record| {
                let owned = record.parent_id() == Some(parent_id);
                if !owned {
                    warn!(
                        entity_type = %E::TYPE,
                        id = %record.id(),
                        parent_id = %parent_id,
                        "Skipping record listed under a foreign parent"
                    );
                }
                owned
            })
            .collect())
    }

    /// Full collection fetch
    pub async fn list_all<E: Entity>(&self) -> Result<Vec<E>> {
        let docs = self.store.list_all(E::TYPE).await?;
        Ok(Self::decode_all(docs))
    }

    fn decode_all<E: Entity>(docs: Vec<Document>) -> Vec<E> {
        docs.into_iter()
            .filter_map(|doc| match E::from_document(doc) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(entity_type = %E::TYPE, error = %e, "Skipping malformed record");
                    None
                }
            })
            .collect()
    }

    /// Apply a partial update and return the updated record
    ///
    /// Only the patched fields and `updated_at` are written.
    /// Concurrent updates are last-writer-wins.
    pub async fn update_fields<E: Entity>(&self, id: &EntityId, patch: Document) -> Result<E> {
        let current: E = self.require(id).await?;
        let updated = current.patched(&patch, Utc::now())?;

        let full = updated.to_document()?;
        let written: Document = patch
            .keys()
            .map(String::as_str)
            .chain(["updated_at"])
            .filter_map(|key| full.get(key).map(|value| (key.to_string(), value.clone())))
            .collect();

        if !self.store.update_fields(E::TYPE, id, &written).await? {
            return Err(DomainError::not_found(E::TYPE, id));
        }

        debug!(entity_type = %E::TYPE, id = %id, fields = written.len(), "Record updated");
        Ok(updated)
    }

    pub async fn delete<E: Entity>(&self, id: &EntityId) -> Result<bool> {
        let removed = self.store.delete(E::TYPE, id).await?;
        debug!(entity_type = %E::TYPE, id = %id, removed, "Record deleted");
        Ok(removed)
    }

    // --- Users and teams ---

    pub async fn active_users(&self) -> Result<Vec<User>> {
        let users: Vec<User> = self.list_all().await?;
        Ok(users.into_iter().filter(User::is_active).collect())
    }

    /// Case-insensitive lookup among users that are not soft-deleted
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.active_users().await?;
        Ok(users
            .into_iter()
            .find(|user| user.email.eq_ignore_ascii_case(email.trim())))
    }

    pub async fn soft_delete_user(&self, user_id: &EntityId) -> Result<User> {
        self.update_fields(user_id, document(json!({"is_deleted": true}))?)
            .await
    }

    pub async fn add_team_member(
        &self,
        team_id: &EntityId,
        user_id: &EntityId,
        role: Option<&str>,
    ) -> Result<TeamMember> {
        self.require::<User>(user_id).await?;

        let member = TeamMember::new(
            team_id.clone(),
            user_id.clone(),
            role.unwrap_or(TeamMember::DEFAULT_ROLE),
        );
        self.create_record(member).await
    }

    pub async fn team_members(&self, team_id: &EntityId) -> Result<Vec<TeamMember>> {
        self.list_by_parent(team_id).await
    }

    pub async fn teams_owned_by(&self, user_id: &EntityId) -> Result<Vec<Team>> {
        let teams: Vec<Team> = self.list_all().await?;
        Ok(teams.into_iter().filter(|t| &t.owner_id == user_id).collect())
    }

    // --- Robot children ---

    pub async fn cameras_for_robot(&self, robot_id: &EntityId) -> Result<Vec<Camera>> {
        self.list_by_parent(robot_id).await
    }

    pub async fn detections_for_camera(
        &self,
        camera_id: &EntityId,
        limit: Option<usize>,
    ) -> Result<Vec<DetectionResult>> {
        self.list_recent_by_parent(camera_id, limit).await
    }

    pub async fn sensor_history(
        &self,
        robot_id: &EntityId,
        limit: Option<usize>,
    ) -> Result<Vec<SensorData>> {
        self.list_recent_by_parent(robot_id, limit).await
    }

    pub async fn command_history(
        &self,
        robot_id: &EntityId,
        limit: Option<usize>,
    ) -> Result<Vec<CommandHistory>> {
        self.list_recent_by_parent(robot_id, limit).await
    }

    pub async fn status_history(
        &self,
        robot_id: &EntityId,
        limit: Option<usize>,
    ) -> Result<Vec<RobotStatusHistory>> {
        self.list_recent_by_parent(robot_id, limit).await
    }

    /// Alerts of one robot, optionally only resolved or only open ones
    pub async fn alerts_for_robot(
        &self,
        robot_id: &EntityId,
        resolved: Option<bool>,
    ) -> Result<Vec<Alert>> {
        let alerts: Vec<Alert> = self.list_by_parent(robot_id).await?;
        Ok(match resolved {
            Some(resolved) => alerts.into_iter().filter(|a| a.resolved == resolved).collect(),
            None => alerts,
        })
    }

    pub async fn maintenance_for_robot(&self, robot_id: &EntityId) -> Result<Vec<MaintenanceRecord>> {
        self.list_by_parent(robot_id).await
    }

    pub async fn reports_for_project(&self, project_id: &EntityId) -> Result<Vec<Report>> {
        self.list_by_parent(project_id).await
    }
}
