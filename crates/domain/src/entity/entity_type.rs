use crate::error::{DomainError, Result};
use crate::keys::SecondaryIndex;
use serde::{Deserialize, Serialize};

/// Closed set of record kinds stored by the fleet layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityType {
    User,
    Team,
    TeamMember,
    Project,
    Report,
    Robot,
    Camera,
    DetectionResult,
    SensorData,
    CommandHistory,
    RobotStatusHistory,
    Alert,
    MaintenanceRecord,
}

impl EntityType {
    pub const ALL: [EntityType; 13] = [
        Self::User,
        Self::Team,
        Self::TeamMember,
        Self::Project,
        Self::Report,
        Self::Robot,
        Self::Camera,
        Self::DetectionResult,
        Self::SensorData,
        Self::CommandHistory,
        Self::RobotStatusHistory,
        Self::Alert,
        Self::MaintenanceRecord,
    ];

    /// Tag written into key segments and the `entity_type` attribute
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Team => "TEAM",
            Self::TeamMember => "TEAM_MEMBER",
            Self::Project => "PROJECT",
            Self::Report => "REPORT",
            Self::Robot => "ROBOT",
            Self::Camera => "CAMERA",
            Self::DetectionResult => "DETECTION_RESULT",
            Self::SensorData => "SENSOR_DATA",
            Self::CommandHistory => "COMMAND_HISTORY",
            Self::RobotStatusHistory => "ROBOT_STATUS_HISTORY",
            Self::Alert => "ALERT",
            Self::MaintenanceRecord => "MAINTENANCE_RECORD",
        }
    }

    /// Prefix of the secondary sort key. Children are grouped under their
    /// parent's partition with this prefix.
    pub fn sort_prefix(&self) -> &'static str {
        match self {
            Self::User => "USER",
            Self::Team => "TEAM",
            Self::TeamMember => "USER",
            Self::Project => "PROJECT",
            Self::Report => "REPORT",
            Self::Robot => "ROBOT",
            Self::Camera => "CAMERA",
            Self::DetectionResult => "DETECTION",
            Self::SensorData => "SENSOR",
            Self::CommandHistory => "COMMAND",
            Self::RobotStatusHistory => "STATUS",
            Self::Alert => "ALERT",
            Self::MaintenanceRecord => "MAINTENANCE",
        }
    }

    /// Owning parent kind, `None` for root entities
    pub fn parent_type(&self) -> Option<EntityType> {
        match self {
            Self::User | Self::Team | Self::Project | Self::Robot => None,
            Self::TeamMember => Some(Self::Team),
            Self::Report => Some(Self::Project),
            Self::Camera
            | Self::SensorData
            | Self::CommandHistory
            | Self::RobotStatusHistory
            | Self::Alert
            | Self::MaintenanceRecord => Some(Self::Robot),
            Self::DetectionResult => Some(Self::Camera),
        }
    }

    /// Secondary index the entity's group lives in
    pub fn index(&self) -> SecondaryIndex {
        match self {
            Self::User | Self::Team | Self::TeamMember => SecondaryIndex::Gsi1,
            Self::Project | Self::Report => SecondaryIndex::Gsi2,
            Self::Robot
            | Self::Camera
            | Self::DetectionResult
            | Self::SensorData
            | Self::CommandHistory
            | Self::RobotStatusHistory
            | Self::Alert
            | Self::MaintenanceRecord => SecondaryIndex::Gsi3,
        }
    }

    /// Whether listings under a parent come back most recent first
    pub fn newest_first(&self) -> bool {
        matches!(
            self,
            Self::CommandHistory
                | Self::RobotStatusHistory
                | Self::DetectionResult
                | Self::Report
                | Self::SensorData
        )
    }

    /// Kinds owned directly by this one
    pub fn child_types(&self) -> impl Iterator<Item = EntityType> + use<> {
        let parent = *self;
        Self::ALL
            .into_iter()
            .filter(move |kind| kind.parent_type() == Some(parent))
    }

    pub fn is_root(&self) -> bool {
        self.parent_type().is_none()
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DomainError::UnknownEntityType(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trip_tags() {
        for entity_type in EntityType::ALL {
            let parsed: EntityType = entity_type.as_str().parse().unwrap();
            assert_eq!(parsed, entity_type);
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = "WIDGET".parse::<EntityType>().unwrap_err();
        assert_eq!(err, DomainError::UnknownEntityType("WIDGET".to_string()));
    }

    #[test]
    fn test_parent_types() {
        assert_eq!(EntityType::Camera.parent_type(), Some(EntityType::Robot));
        assert_eq!(
            EntityType::DetectionResult.parent_type(),
            Some(EntityType::Camera)
        );
        assert_eq!(EntityType::TeamMember.parent_type(), Some(EntityType::Team));
        assert_eq!(EntityType::Report.parent_type(), Some(EntityType::Project));
        assert!(EntityType::Robot.is_root());
        assert!(EntityType::User.is_root());
    }

    #[test]
    fn test_child_types() {
        let robot_children: Vec<_> = EntityType::Robot.child_types().collect();
        assert_eq!(
            robot_children,
            [
                EntityType::Camera,
                EntityType::SensorData,
                EntityType::CommandHistory,
                EntityType::RobotStatusHistory,
                EntityType::Alert,
                EntityType::MaintenanceRecord,
            ]
        );
        assert_eq!(
            EntityType::Camera.child_types().collect::<Vec<_>>(),
            [EntityType::DetectionResult]
        );
        assert_eq!(EntityType::User.child_types().count(), 0);
    }

    #[test]
    fn test_children_share_parent_index() {
        for entity_type in EntityType::ALL {
            if let Some(parent) = entity_type.parent_type() {
                assert_eq!(entity_type.index(), parent.index(), "{entity_type}");
            }
        }
    }

    #[test]
    fn test_serde_uses_tags() {
        let json = serde_json::to_string(&EntityType::RobotStatusHistory).unwrap();
        assert_eq!(json, "\"ROBOT_STATUS_HISTORY\"");
    }
}
