//! Domain layer - fleet records and storage contracts with no infrastructure
//!
//! This crate contains:
//! - Entities (Robot, Camera, Alert, ...) with closed status enumerations
//! - Value objects (EntityId, Location, BoundingBox)
//! - The single-table key mapping
//! - The canonical EntityStore contract every backend implements
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Records are validated before they reach a store

pub mod entity;
pub mod error;
pub mod id;
pub mod keys;
pub mod store;

// Re-export commonly used types
pub use entity::{
    Alert, AlertLevel, BatteryAlertPolicy, BoundingBox, Camera, CameraPosition, CommandHistory,
    DetectionResult, DetectionSummary, Entity, EntityType, Location, MaintenanceRecord,
    MaintenanceStatus, MaintenanceType, Project, ProjectStatus, Report, Robot, RobotStatus,
    RobotStatusHistory, SensorData, StreamQuality, StreamType, Team, TeamMember, User, UserRole,
    Vector3,
};
pub use error::{DomainError, Result};
pub use id::EntityId;
pub use keys::{EntityKeys, IndexQuery, KeyPair, ParentRef, SecondaryIndex, derive_keys};
pub use store::{Document, EntityStore, StoredRecord, document};
