//! Fleet records
//!
//! Every stored record implements [`Entity`]: it knows its own kind, its
//! identifier, its owning parent (if any) and its audit timestamps. Records
//! cross the storage boundary as JSON documents whose keys are the struct
//! field names.

use crate::error::{DomainError, Result};
use crate::id::EntityId;
use crate::store::Document;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

macro_rules! entity_common {
    ($kind:ident $(, check = $check:ident)?) => {
        const TYPE: $crate::entity::EntityType = $crate::entity::EntityType::$kind;

        fn id(&self) -> &$crate::id::EntityId {
            &self.id
        }

        fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
            self.created_at
        }

        fn updated_at(&self) -> chrono::DateTime<chrono::Utc> {
            self.updated_at
        }

        fn set_timestamps(
            &mut self,
            created_at: chrono::DateTime<chrono::Utc>,
            updated_at: chrono::DateTime<chrono::Utc>,
        ) {
            self.created_at = created_at;
            self.updated_at = updated_at;
        }

        $(
            fn check(&self) -> $crate::error::Result<()> {
                self.$check()
            }
        )?
    };
}

macro_rules! root_entity {
    ($ty:ty, $kind:ident $(, check = $check:ident)?) => {
        impl $crate::entity::Entity for $ty {
            const PARENT_FIELD: Option<&'static str> = None;

            fn parent_id(&self) -> Option<&$crate::id::EntityId> {
                None
            }

            entity_common!($kind $(, check = $check)?);
        }
    };
}

macro_rules! child_entity {
    ($ty:ty, $kind:ident, parent = $parent:ident $(, check = $check:ident)?) => {
        impl $crate::entity::Entity for $ty {
            const PARENT_FIELD: Option<&'static str> = Some(stringify!($parent));

            fn parent_id(&self) -> Option<&$crate::id::EntityId> {
                Some(&self.$parent)
            }

            entity_common!($kind $(, check = $check)?);
        }
    };
}

mod alert;
mod camera;
mod entity_type;
mod history;
mod maintenance;
mod project;
mod report;
mod robot;
mod sensor;
mod team;
mod user;

pub use alert::{Alert, AlertLevel, BatteryAlertPolicy};
pub use camera::{BoundingBox, Camera, CameraPosition, DetectionResult, StreamQuality, StreamType};
pub use entity_type::EntityType;
pub use history::{CommandHistory, RobotStatusHistory};
pub use maintenance::{MaintenanceRecord, MaintenanceStatus, MaintenanceType};
pub use project::{Project, ProjectStatus};
pub use report::{DetectionSummary, Report};
pub use robot::{Location, Robot, RobotStatus};
pub use sensor::{SensorData, Vector3};
pub use team::{Team, TeamMember};
pub use user::{User, UserRole};

/// Fields no update may touch, besides the owning-parent field
pub const IMMUTABLE_FIELDS: [&str; 3] = ["id", "created_at", "updated_at"];

/// A record the fleet layer can persist
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TYPE: EntityType;

    /// Name of the field referencing the owning parent
    const PARENT_FIELD: Option<&'static str>;

    fn id(&self) -> &EntityId;

    fn parent_id(&self) -> Option<&EntityId>;

    fn created_at(&self) -> DateTime<Utc>;

    fn updated_at(&self) -> DateTime<Utc>;

    fn set_timestamps(&mut self, created_at: DateTime<Utc>, updated_at: DateTime<Utc>);

    /// Kind-specific field rules
    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Validate the whole record
    fn validate(&self) -> Result<()> {
        if self.updated_at() < self.created_at() {
            return Err(invalid(Self::TYPE, "updated_at precedes created_at"));
        }
        self.check()
    }

    fn to_document(&self) -> Result<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(invalid(
                Self::TYPE,
                format!("serialized to {other} instead of a document"),
            )),
            Err(e) => Err(invalid(Self::TYPE, e.to_string())),
        }
    }

    fn from_document(doc: Document) -> Result<Self> {
        serde_json::from_value(Value::Object(doc)).map_err(|e| DomainError::MalformedRecord {
            entity: Self::TYPE,
            reason: e.to_string(),
        })
    }

    /// Apply a partial update, returning the revised record.
    ///
    /// Identity, audit timestamps and the parent reference are immutable.
    /// The result is stamped with `now` and validated.
    fn patched(&self, patch: &Document, now: DateTime<Utc>) -> Result<Self> {
        if patch.is_empty() {
            return Err(DomainError::InvalidPatch("no fields to update".to_string()));
        }

        let mut doc = self.to_document()?;
        for (key, value) in patch {
            if IMMUTABLE_FIELDS.contains(&key.as_str()) || Self::PARENT_FIELD == Some(key.as_str())
            {
                return Err(DomainError::ImmutableField(key.clone()));
            }
            if !doc.contains_key(key) {
                return Err(DomainError::InvalidPatch(format!(
                    "{} has no field '{key}'",
                    Self::TYPE
                )));
            }
            doc.insert(key.clone(), value.clone());
        }

        let mut updated: Self = serde_json::from_value(Value::Object(doc))
            .map_err(|e| DomainError::InvalidPatch(e.to_string()))?;
        let created_at = updated.created_at();
        updated.set_timestamps(created_at, now.max(created_at));
        updated.validate()?;
        Ok(updated)
    }
}

pub(crate) fn invalid(entity: EntityType, reason: impl Into<String>) -> DomainError {
    DomainError::InvalidEntity {
        entity,
        reason: reason.into(),
    }
}

pub(crate) fn ensure_non_empty(entity: EntityType, field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(entity, format!("{field} cannot be empty")));
    }
    Ok(())
}

pub(crate) fn ensure_range(
    entity: EntityType,
    field: &str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(invalid(
            entity,
            format!("{field} must be within {min}..={max}, got {value}"),
        ));
    }
    Ok(())
}

pub(crate) fn ensure_non_negative(entity: EntityType, field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(
            entity,
            format!("{field} must be non-negative, got {value}"),
        ));
    }
    Ok(())
}
