use super::{EntityType, ensure_non_empty, ensure_non_negative, ensure_range};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Streaming protocol a camera publishes on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamType {
    Rtsp,
    Http,
    Webrtc,
}

impl StreamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rtsp => "rtsp",
            Self::Http => "http",
            Self::Webrtc => "webrtc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamQuality {
    Low,
    Medium,
    High,
}

impl StreamQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Default for StreamQuality {
    fn default() -> Self {
        Self::Medium
    }
}

/// Mounting position on the robot body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CameraPosition {
    Head,
    Front,
    Rear,
    Left,
    Right,
}

impl CameraPosition {
    pub const ALL: [CameraPosition; 5] = [
        Self::Head,
        Self::Front,
        Self::Rear,
        Self::Left,
        Self::Right,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::Front => "front",
            Self::Rear => "rear",
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Camera {
    pub id: EntityId,
    pub robot_id: EntityId,
    pub name: String,
    pub stream_url: String,
    pub stream_type: StreamType,
    pub quality: StreamQuality,
    pub is_active: bool,
    pub position: CameraPosition,
    pub last_accessed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(Camera, Camera, parent = robot_id, check = check_fields);

impl Camera {
    /// An active front-mounted RTSP camera
    pub fn new(robot_id: EntityId, name: impl Into<String>, stream_url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            robot_id,
            name: name.into(),
            stream_url: stream_url.into(),
            stream_type: StreamType::Rtsp,
            quality: StreamQuality::default(),
            is_active: true,
            position: CameraPosition::Front,
            last_accessed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_position(mut self, position: CameraPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_stream(mut self, stream_type: StreamType, quality: StreamQuality) -> Self {
        self.stream_type = stream_type;
        self.quality = quality;
        self
    }

    fn check_fields(&self) -> Result<()> {
        ensure_non_empty(EntityType::Camera, "name", &self.name)?;
        ensure_non_empty(EntityType::Camera, "stream_url", &self.stream_url)
    }
}

/// Axis-aligned box in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// A single object detection produced from a camera frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionResult {
    pub id: EntityId,
    pub camera_id: EntityId,
    pub class_label: String,
    pub confidence: f64,
    pub bbox: BoundingBox,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(DetectionResult, DetectionResult, parent = camera_id, check = check_fields);

impl DetectionResult {
    pub fn new(
        camera_id: EntityId,
        class_label: impl Into<String>,
        confidence: f64,
        bbox: BoundingBox,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            camera_id,
            class_label: class_label.into(),
            confidence,
            bbox,
            created_at: now,
            updated_at: now,
        }
    }

    fn check_fields(&self) -> Result<()> {
        let kind = EntityType::DetectionResult;
        ensure_non_empty(kind, "class_label", &self.class_label)?;
        ensure_range(kind, "confidence", self.confidence, 0.0, 1.0)?;
        ensure_non_negative(kind, "bbox.width", self.bbox.width)?;
        ensure_non_negative(kind, "bbox.height", self.bbox.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;

    fn bbox() -> BoundingBox {
        BoundingBox {
            x: 10.0,
            y: 20.0,
            width: 64.0,
            height: 48.0,
        }
    }

    #[test]
    fn test_confidence_bounds() {
        let camera_id = EntityId::generate();
        assert!(DetectionResult::new(camera_id.clone(), "person", 1.0, bbox())
            .validate()
            .is_ok());
        assert!(DetectionResult::new(camera_id.clone(), "person", 1.01, bbox())
            .validate()
            .is_err());
        assert!(DetectionResult::new(camera_id, "person", -0.1, bbox())
            .validate()
            .is_err());
    }

    #[test]
    fn test_negative_box_rejected() {
        let mut b = bbox();
        b.width = -1.0;
        let detection = DetectionResult::new(EntityId::generate(), "car", 0.9, b);
        assert!(detection.validate().is_err());
    }

    #[test]
    fn test_camera_enums_serde() {
        let camera = Camera::new(EntityId::generate(), "Head cam", "rtsp://10.0.0.5:8554/head")
            .with_position(CameraPosition::Head)
            .with_stream(StreamType::Webrtc, StreamQuality::High);
        let doc = camera.to_document().unwrap();
        assert_eq!(doc["position"], "head");
        assert_eq!(doc["stream_type"], "webrtc");
        assert_eq!(doc["quality"], "high");
        assert_eq!(camera.parent_id(), Some(&camera.robot_id));
    }
}
