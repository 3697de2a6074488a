use super::{EntityType, ensure_non_empty, invalid};
use crate::error::Result;
use crate::id::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Detection counts aggregated over a set of cameras
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DetectionSummary {
    pub total: u32,
    pub by_class: BTreeMap<String, u32>,
}

impl DetectionSummary {
    pub fn record(&mut self, class_label: &str) {
        self.total += 1;
        *self.by_class.entry(class_label.to_string()).or_insert(0) += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Report {
    pub id: EntityId,
    pub project_id: EntityId,
    pub author_id: EntityId,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub detection_summary: DetectionSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

child_entity!(Report, Report, parent = project_id, check = check_fields);

impl Report {
    pub fn new(
        project_id: EntityId,
        author_id: EntityId,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: EntityId::generate(),
            project_id,
            author_id,
            title: title.into(),
            content: content.into(),
            detection_summary: DetectionSummary::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_summary(mut self, summary: DetectionSummary) -> Self {
        self.detection_summary = summary;
        self
    }

    fn check_fields(&self) -> Result<()> {
        ensure_non_empty(EntityType::Report, "title", &self.title)?;
        let counted: u32 = self.detection_summary.by_class.values().sum();
        if counted != self.detection_summary.total {
            return Err(invalid(
                EntityType::Report,
                format!(
                    "detection_summary total {} does not match per-class sum {counted}",
                    self.detection_summary.total
                ),
            ));
        }
        Ok(())
    }
}
