//! Persisting generated demo data and copying a fleet between stores

use crate::repository::FleetRepository;
use domain::{
    Alert, Camera, CommandHistory, DetectionResult, Entity, MaintenanceRecord, Project, Report,
    Result, Robot, RobotStatusHistory, SensorData, Team, TeamMember, User,
};
use infrastructure::FleetDataset;
use tracing::{debug, info};

async fn import_all<E: Entity>(repo: &FleetRepository, records: &[E]) -> Result<usize> {
    for record in records {
        repo.import(record).await?;
    }
    debug!(entity_type = %E::TYPE, count = records.len(), "Imported records");
    Ok(records.len())
}

/// Store a generated dataset, parents before children.
/// Returns the number of records written.
pub async fn seed_dataset(repo: &FleetRepository, dataset: &FleetDataset) -> Result<usize> {
    let mut written = 0;

    written += import_all(repo, &dataset.users).await?;
    written += import_all(repo, &dataset.teams).await?;
    written += import_all(repo, &dataset.team_members).await?;
    written += import_all(repo, &dataset.projects).await?;
    written += import_all(repo, &dataset.robots).await?;
    written += import_all(repo, &dataset.cameras).await?;
    written += import_all(repo, &dataset.detections).await?;
    written += import_all(repo, &dataset.sensor_data).await?;
    written += import_all(repo, &dataset.alerts).await?;
    written += import_all(repo, &dataset.maintenance).await?;
    written += import_all(repo, &dataset.commands).await?;
    written += import_all(repo, &dataset.status_history).await?;
    written += import_all(repo, &dataset.reports).await?;

    info!(records = written, robots = dataset.robots.len(), "Seeded fleet dataset");
    Ok(written)
}

async fn copy_kind<E: Entity>(source: &FleetRepository, target: &FleetRepository) -> Result<usize> {
    let records: Vec<E> = source.list_all().await?;
    import_all(target, &records).await
}

/// Copy every record from one store into another, parents before
/// children, keeping ids and timestamps. Returns the number of records
/// written.
pub async fn copy_fleet(source: &FleetRepository, target: &FleetRepository) -> Result<usize> {
    let mut written = 0;

    written += copy_kind::<User>(source, target).await?;
    written += copy_kind::<Team>(source, target).await?;
    written += copy_kind::<TeamMember>(source, target).await?;
    written += copy_kind::<Project>(source, target).await?;
    written += copy_kind::<Robot>(source, target).await?;
    written += copy_kind::<Camera>(source, target).await?;
    written += copy_kind::<DetectionResult>(source, target).await?;
    written += copy_kind::<SensorData>(source, target).await?;
    written += copy_kind::<Alert>(source, target).await?;
    written += copy_kind::<MaintenanceRecord>(source, target).await?;
    written += copy_kind::<CommandHistory>(source, target).await?;
    written += copy_kind::<RobotStatusHistory>(source, target).await?;
    written += copy_kind::<Report>(source, target).await?;

    info!(records = written, "Copied fleet between stores");
    Ok(written)
}
