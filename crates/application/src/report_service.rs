use crate::repository::FleetRepository;
use domain::{DetectionResult, DetectionSummary, EntityId, Report, Result, User};
use tracing::info;

/// Detection reporting per project
#[derive(Clone)]
pub struct ReportService {
    repo: FleetRepository,
}

impl ReportService {
    pub fn new(repo: FleetRepository) -> Self {
        Self { repo }
    }

    /// Count every detection of the given cameras by class label
    pub async fn summarize_detections(&self, camera_ids: &[EntityId]) -> Result<DetectionSummary> {
        let mut summary = DetectionSummary::default();
        for camera_id in camera_ids {
            let detections: Vec<DetectionResult> =
                self.repo.detections_for_camera(camera_id, None).await?;
            for detection in &detections {
                summary.record(&detection.class_label);
            }
        }
        Ok(summary)
    }

    pub async fn create_report(
        &self,
        project_id: &EntityId,
        author_id: &EntityId,
        title: &str,
        content: &str,
        camera_ids: &[EntityId],
    ) -> Result<Report> {
        self.repo.require::<User>(author_id).await?;

        let summary = self.summarize_detections(camera_ids).await?;
        let report = Report::new(project_id.clone(), author_id.clone(), title, content)
            .with_summary(summary);
        let report = self.repo.create_record(report).await?;

        info!(
            report_id = %report.id,
            project_id = %project_id,
            detections = report.detection_summary.total,
            "Report created"
        );
        Ok(report)
    }

    pub async fn reports_for_project(&self, project_id: &EntityId) -> Result<Vec<Report>> {
        self.repo.reports_for_project(project_id).await
    }
}
