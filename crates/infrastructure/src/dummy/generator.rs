use super::pools::{self, SEOUL_LAT, SEOUL_LNG};
use crate::config::CameraStreamConfig;
use chrono::{DateTime, Duration, Utc};
use domain::{
    Alert, AlertLevel, BoundingBox, Camera, CameraPosition, CommandHistory, DetectionResult,
    DetectionSummary, Entity, EntityId, Location, MaintenanceRecord, MaintenanceStatus,
    MaintenanceType, Project, ProjectStatus, Report, Robot, RobotStatus, RobotStatusHistory,
    SensorData, StreamQuality, StreamType, Team, TeamMember, User, UserRole, Vector3,
};
use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::json;
use tracing::info;

const ROBOT_STATUSES: [RobotStatus; 7] = [
    RobotStatus::Online,
    RobotStatus::Offline,
    RobotStatus::Maintenance,
    RobotStatus::Error,
    RobotStatus::Charging,
    RobotStatus::Moving,
    RobotStatus::Idle,
];
const ALERT_LEVELS: [AlertLevel; 4] = [
    AlertLevel::Info,
    AlertLevel::Warning,
    AlertLevel::Error,
    AlertLevel::Critical,
];
const MAINTENANCE_STATUSES: [MaintenanceStatus; 4] = [
    MaintenanceStatus::Scheduled,
    MaintenanceStatus::InProgress,
    MaintenanceStatus::Completed,
    MaintenanceStatus::Cancelled,
];
const USER_ROLES: [UserRole; 4] = [
    UserRole::Admin,
    UserRole::Operator,
    UserRole::Viewer,
    UserRole::Technician,
];
const STREAM_TYPES: [StreamType; 3] = [StreamType::Rtsp, StreamType::Http, StreamType::Webrtc];

#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    pub robots: usize,
    pub users: usize,
    /// Window of sensor history, in hours
    pub sensor_hours: i64,
    pub sensor_step_minutes: i64,
    pub alert_days: i64,
    pub maintenance_months: i64,
    /// Port used in generated RTSP camera URLs
    pub rtsp_port: u16,
    /// Port used in generated HTTP camera URLs
    pub http_port: u16,
    /// Quality every generated camera streams at
    pub stream_quality: StreamQuality,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            robots: 10,
            users: 5,
            sensor_hours: 24,
            sensor_step_minutes: 5,
            alert_days: 30,
            maintenance_months: 12,
            rtsp_port: 8554,
            http_port: 8080,
            stream_quality: StreamQuality::default(),
        }
    }
}

impl GeneratorOptions {
    /// Take camera ports and quality from the stream configuration
    pub fn with_camera_config(mut self, camera: &CameraStreamConfig) -> Self {
        self.rtsp_port = camera.rtsp_port;
        self.http_port = camera.http_port;
        self.stream_quality = camera.stream_quality;
        self
    }
}

/// A complete, internally consistent demo fleet
#[derive(Debug, Clone, Default)]
pub struct FleetDataset {
    pub users: Vec<User>,
    pub teams: Vec<Team>,
    pub team_members: Vec<TeamMember>,
    pub projects: Vec<Project>,
    pub robots: Vec<Robot>,
    pub cameras: Vec<Camera>,
    pub detections: Vec<DetectionResult>,
    pub sensor_data: Vec<SensorData>,
    pub alerts: Vec<Alert>,
    pub maintenance: Vec<MaintenanceRecord>,
    pub commands: Vec<CommandHistory>,
    pub status_history: Vec<RobotStatusHistory>,
    pub reports: Vec<Report>,
}

impl FleetDataset {
    pub fn record_count(&self) -> usize {
        self.users.len()
            + self.teams.len()
            + self.team_members.len()
            + self.projects.len()
            + self.robots.len()
            + self.cameras.len()
            + self.detections.len()
            + self.sensor_data.len()
            + self.alerts.len()
            + self.maintenance.len()
            + self.commands.len()
            + self.status_history.len()
            + self.reports.len()
    }
}

/// Generates demo fleets. Output is random; every call differs.
pub struct DummyDataGenerator {
    now: DateTime<Utc>,
}

impl Default for DummyDataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera URL whose scheme and port match the stream type. WebRTC
/// signalling goes over the default HTTPS port.
fn stream_url(stream_type: StreamType, host: &str, n: usize, options: &GeneratorOptions) -> String {
    match stream_type {
        StreamType::Rtsp => format!("rtsp://camera-{host}.local:{}/stream{n}", options.rtsp_port),
        StreamType::Http => format!("http://camera-{host}.local:{}/stream{n}", options.http_port),
        StreamType::Webrtc => format!("https://camera-{host}.local/webrtc/stream{n}"),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

/// Back-date a record; `updated_at` never precedes `created_at`
fn stamped<E: Entity>(mut entity: E, created_at: DateTime<Utc>, updated_at: DateTime<Utc>) -> E {
    entity.set_timestamps(created_at, updated_at.max(created_at));
    entity
}

impl DummyDataGenerator {
    pub fn new() -> Self {
        Self { now: Utc::now() }
    }

    /// Generate relative to a fixed "now"
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn generate(&self, options: &GeneratorOptions) -> FleetDataset {
        self.generate_with(&mut rand::thread_rng(), options)
    }

    pub fn generate_with<R: Rng>(&self, rng: &mut R, options: &GeneratorOptions) -> FleetDataset {
        let mut dataset = FleetDataset::default();

        self.generate_organisation(rng, options, &mut dataset);

        let project_id = dataset.projects.first().map(|p| p.id.clone());
        for index in 0..options.robots {
            let robot = self.generate_robot(rng, index, project_id.clone());
            self.generate_sensor_history(rng, &robot, options, &mut dataset);
            self.generate_alerts(rng, &robot, options, &mut dataset);
            self.generate_maintenance(rng, &robot, options, &mut dataset);
            self.generate_cameras(rng, &robot, options, &mut dataset);
            self.generate_logs(rng, &robot, &mut dataset);
            dataset.robots.push(robot);
        }

        self.generate_report(&mut dataset);

        info!(
            robots = dataset.robots.len(),
            sensor_readings = dataset.sensor_data.len(),
            alerts = dataset.alerts.len(),
            records = dataset.record_count(),
            "Generated dummy fleet"
        );
        dataset
    }

    fn random_time_within<R: Rng>(&self, rng: &mut R, window: Duration) -> DateTime<Utc> {
        let seconds = window.num_seconds().max(1);
        self.now - Duration::seconds(rng.gen_range(0..=seconds))
    }

    /// `count` increasing instants inside the last `window`, at least a second apart
    fn ascending_times<R: Rng>(&self, rng: &mut R, window: Duration, count: usize) -> Vec<DateTime<Utc>> {
        let mut offsets: Vec<i64> = (0..count)
            .map(|_| rng.gen_range(1..=window.num_seconds().max(1)))
            .collect();
        offsets.sort_unstable();
        offsets.dedup();
        offsets
            .into_iter()
            .rev()
            .map(|offset| self.now - Duration::seconds(offset))
            .collect()
    }

    fn generate_organisation<R: Rng>(
        &self,
        rng: &mut R,
        options: &GeneratorOptions,
        dataset: &mut FleetDataset,
    ) {
        for i in 0..options.users.max(1) {
            let created = self.now - Duration::days(rng.gen_range(1..=365));
            let role = if i == 0 {
                UserRole::Admin
            } else {
                *pick(rng, &USER_ROLES)
            };
            let mut user = User::new(
                *pick(rng, &pools::FIRST_NAMES),
                *pick(rng, &pools::LAST_NAMES),
                format!("user{}@company.com", i + 1),
                role,
            )
            .with_department(*pick(rng, &pools::DEPARTMENTS));
            user.id = EntityId::generate_at(created);
            if rng.gen_bool(0.5) {
                user.last_login_at = Some(self.random_time_within(rng, Duration::days(7)));
            }
            let updated = user.last_login_at.unwrap_or(created);
            dataset.users.push(stamped(user, created, updated));
        }

        let owner = dataset.users[0].id.clone();
        let created = self.now - Duration::days(120);

        let mut team = Team::new(owner.clone(), "Field Operations")
            .with_description("Operators and technicians running the survey fleet");
        team.id = EntityId::generate_at(created);
        let team = stamped(team, created, created);

        for user in &dataset.users {
            let role = if user.id == owner { "Owner" } else { TeamMember::DEFAULT_ROLE };
            let member = TeamMember::new(team.id.clone(), user.id.clone(), role);
            dataset.team_members.push(stamped(member, created, created));
        }

        let mut project = Project::new(owner, "Campus Information Survey").with_team(team.id.clone());
        project.id = EntityId::generate_at(created);
        project.description = Some("Autonomous document and signage survey across Seoul campuses".to_string());
        project.status = ProjectStatus::Active;
        project.start_date = Some(self.now - Duration::days(90));
        project.end_date = Some(self.now + Duration::days(90));

        dataset.projects.push(stamped(project, created, created));
        dataset.teams.push(team);
    }

    fn generate_robot<R: Rng>(&self, rng: &mut R, index: usize, project_id: Option<EntityId>) -> Robot {
        let created = self.now - Duration::days(rng.gen_range(1..=365));
        let name = pools::ROBOT_NAMES[index % pools::ROBOT_NAMES.len()];

        let mut robot = Robot::new(name, *pick(rng, &pools::ROBOT_MODELS))
            .with_id(EntityId::generate_at(created))
            .with_status(*pick(rng, &ROBOT_STATUSES))
            .with_battery(round2(rng.gen_range(20.0..=100.0)))
            .with_location(Location::Geographic {
                latitude: round4(rng.gen_range(SEOUL_LAT.0..=SEOUL_LAT.1)),
                longitude: round4(rng.gen_range(SEOUL_LNG.0..=SEOUL_LNG.1)),
                altitude: Some(round2(rng.gen_range(0.0..100.0))),
                accuracy: Some(round2(rng.gen_range(1.0..10.0))),
            });
        robot.project_id = project_id;
        robot.signal_strength = Some(round2(rng.gen_range(40.0..=100.0)));
        robot.ping_ms = Some(rng.gen_range(10..=200));
        robot.manufacturer = Some(pick(rng, &pools::MANUFACTURERS).to_string());
        robot.serial_number = Some(format!("SN{}", rng.gen_range(100_000..=999_999)));
        robot.firmware_version = Some(format!(
            "v{}.{}.{}",
            rng.gen_range(1..=5),
            rng.gen_range(0..=9),
            rng.gen_range(0..=9)
        ));
        robot.total_operating_hours = round2(rng.gen_range(100.0..2000.0));
        robot.last_maintenance_at = Some(self.now - Duration::days(rng.gen_range(30..=180)));
        robot.next_maintenance_at = Some(self.now + Duration::days(rng.gen_range(30..=90)));

        stamped(robot, created, self.now)
    }

    fn generate_sensor_history<R: Rng>(
        &self,
        rng: &mut R,
        robot: &Robot,
        options: &GeneratorOptions,
        dataset: &mut FleetDataset,
    ) {
        let step = Duration::minutes(options.sensor_step_minutes.max(1));
        let mut at = self.now - Duration::hours(options.sensor_hours.max(0));

        while at <= self.now {
            let mut reading = SensorData::new(robot.id.clone())
                .with_environment(
                    round2(rng.gen_range(18.0..25.0)),
                    round2(rng.gen_range(40.0..70.0)),
                    round2(rng.gen_range(1000.0..1025.0)),
                )
                .with_battery(round2(rng.gen_range(20.0..=100.0)));
            reading.id = EntityId::generate_at(at);
            reading.imu_gyro = Some(Vector3 {
                x: round2(rng.gen_range(-0.5..0.5)),
                y: round2(rng.gen_range(-0.5..0.5)),
                z: round2(rng.gen_range(-0.5..0.5)),
            });
            reading.imu_acc = Some(Vector3 {
                x: round2(rng.gen_range(-0.3..0.3)),
                y: round2(rng.gen_range(-0.3..0.3)),
                z: round2(rng.gen_range(9.6..10.0)),
            });
            dataset.sensor_data.push(stamped(reading, at, at));
            at += step;
        }
    }

    fn generate_alerts<R: Rng>(
        &self,
        rng: &mut R,
        robot: &Robot,
        options: &GeneratorOptions,
        dataset: &mut FleetDataset,
    ) {
        let window = Duration::days(options.alert_days.max(1));
        for _ in 0..rng.gen_range(1..=5) {
            let level = *pick(rng, &ALERT_LEVELS);
            let raised = self.random_time_within(rng, window);

            let mut alert = Alert::new(robot.id.clone(), level, *pick(rng, pools::alert_messages(level)));
            alert.id = EntityId::generate_at(raised);

            let mut updated = raised;
            if rng.gen_bool(0.5) {
                let resolved_at = (raised + Duration::minutes(rng.gen_range(5..=240))).min(self.now);
                alert.resolved = true;
                alert.resolved_at = Some(resolved_at);
                alert.resolved_by = Some(pick(rng, &pools::TECHNICIANS).to_string());
                updated = resolved_at;
            }
            dataset.alerts.push(stamped(alert, raised, updated));
        }
    }

    fn generate_maintenance<R: Rng>(
        &self,
        rng: &mut R,
        robot: &Robot,
        options: &GeneratorOptions,
        dataset: &mut FleetDataset,
    ) {
        let window = Duration::days(options.maintenance_months.max(1) * 30);
        for _ in 0..rng.gen_range(2..=4) {
            let maintenance_type = *pick(rng, &MaintenanceType::ALL);
            let status = *pick(rng, &MAINTENANCE_STATUSES);
            let start = self.random_time_within(rng, window);

            let mut record = MaintenanceRecord::new(
                robot.id.clone(),
                maintenance_type,
                format!("{} maintenance work", maintenance_type.as_str().replace('_', " ")),
                start,
            );
            record.id = EntityId::generate_at(start);
            record.status = status;
            if matches!(status, MaintenanceStatus::Completed | MaintenanceStatus::InProgress) {
                record.end_date = Some(start + Duration::hours(rng.gen_range(1..=8)));
            }
            record.technician = Some(pick(rng, &pools::TECHNICIANS).to_string());
            record.cost = Some(round2(rng.gen_range(50_000.0..500_000.0)));
            let part_count = rng.gen_range(0..=3);
            record.parts_replaced = pools::PARTS
                .choose_multiple(rng, part_count)
                .map(|part| part.to_string())
                .collect();

            let updated = record.end_date.unwrap_or(start);
            dataset.maintenance.push(stamped(record, start, updated));
        }
    }

    fn generate_cameras<R: Rng>(
        &self,
        rng: &mut R,
        robot: &Robot,
        options: &GeneratorOptions,
        dataset: &mut FleetDataset,
    ) {
        let host: String = robot.id.as_str().chars().take(8).collect();
        let count = rng.gen_range(1..=2);

        for (i, position) in CameraPosition::ALL.iter().skip(1).take(count).enumerate() {
            let created = self.now - Duration::days(rng.gen_range(1..=30));
            let stream_type = *pick(rng, &STREAM_TYPES);
            let url = stream_url(stream_type, &host, i + 1, options);
            let mut camera = Camera::new(robot.id.clone(), format!("{} {}", robot.name, position.as_str()), url)
                .with_position(*position)
                .with_stream(stream_type, options.stream_quality);
            camera.id = EntityId::generate_at(created);
            camera.is_active = rng.gen_bool(0.5);
            if rng.gen_bool(0.5) {
                camera.last_accessed_at = Some(self.now);
            }
            let touched = camera.last_accessed_at.unwrap_or(created);
            let camera = stamped(camera, created, touched);

            let detection_count = rng.gen_range(3..=8);
            for at in self.ascending_times(rng, Duration::hours(24), detection_count) {
                let width = round2(rng.gen_range(20.0..400.0));
                let height = round2(rng.gen_range(20.0..400.0));
                let mut detection = DetectionResult::new(
                    camera.id.clone(),
                    *pick(rng, &pools::DETECTION_CLASSES),
                    round2(rng.gen_range(0.5..0.99)),
                    BoundingBox {
                        x: round2(rng.gen_range(0.0..(1920.0 - width))),
                        y: round2(rng.gen_range(0.0..(1080.0 - height))),
                        width,
                        height,
                    },
                );
                detection.id = EntityId::generate_at(at);
                dataset.detections.push(stamped(detection, at, at));
            }

            dataset.cameras.push(camera);
        }
    }

    /// Command log and status history
    fn generate_logs<R: Rng>(&self, rng: &mut R, robot: &Robot, dataset: &mut FleetDataset) {
        let operators: Vec<EntityId> = dataset.users.iter().map(|u| u.id.clone()).collect();

        let command_count = rng.gen_range(2..=4);
        for at in self.ascending_times(rng, Duration::hours(24), command_count) {
            let command_type = *pick(rng, &pools::COMMAND_TYPES);
            let detail = match command_type {
                "move_to" => json!({
                    "latitude": round4(rng.gen_range(SEOUL_LAT.0..=SEOUL_LAT.1)),
                    "longitude": round4(rng.gen_range(SEOUL_LNG.0..=SEOUL_LNG.1)),
                }),
                "start_patrol" => json!({"route": format!("route-{}", rng.gen_range(1..=9))}),
                "capture_image" => json!({"camera": "front", "resolution": "1920x1080"}),
                _ => json!({}),
            };
            let mut command = CommandHistory::new(robot.id.clone(), command_type, detail)
                .issued_by(pick(rng, &operators).clone());
            command.id = EntityId::generate_at(at);
            dataset.commands.push(stamped(command, at, at));
        }

        let times = self.ascending_times(rng, Duration::hours(24), 3);
        let last = times.len().saturating_sub(1);
        for (i, at) in times.into_iter().enumerate() {
            // The latest entry agrees with the robot's current status
            let status = if i == last { robot.status } else { *pick(rng, &ROBOT_STATUSES) };
            let mut entry = RobotStatusHistory::new(robot.id.clone(), status);
            entry.id = EntityId::generate_at(at);
            entry.battery_level = Some(round2(rng.gen_range(20.0..=100.0)));
            entry.connection = Some(pick(rng, &pools::CONNECTIONS).to_string());
            entry.event = Some(format!("status changed to {}", status.as_str()));
            dataset.status_history.push(stamped(entry, at, at));
        }
    }

    fn generate_report(&self, dataset: &mut FleetDataset) {
        let (Some(project), Some(author)) = (dataset.projects.first(), dataset.users.first()) else {
            return;
        };

        let mut summary = DetectionSummary::default();
        for detection in &dataset.detections {
            summary.record(&detection.class_label);
        }

        let content = format!(
            "{} robots reported {} detections across {} cameras in the last 24 hours.",
            dataset.robots.len(),
            summary.total,
            dataset.cameras.len()
        );
        let mut report = Report::new(project.id.clone(), author.id.clone(), "Daily detection summary", content)
            .with_summary(summary);
        report.id = EntityId::generate_at(self.now);

        dataset.reports.push(stamped(report, self.now, self.now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn dataset(options: &GeneratorOptions) -> FleetDataset {
        let mut rng = StdRng::seed_from_u64(7);
        DummyDataGenerator::new().generate_with(&mut rng, options)
    }

    #[test]
    fn test_every_record_validates() {
        let data = dataset(&GeneratorOptions::default());

        data.users.iter().try_for_each(Entity::validate).unwrap();
        data.robots.iter().try_for_each(Entity::validate).unwrap();
        data.cameras.iter().try_for_each(Entity::validate).unwrap();
        data.detections.iter().try_for_each(Entity::validate).unwrap();
        data.sensor_data.iter().try_for_each(Entity::validate).unwrap();
        data.alerts.iter().try_for_each(Entity::validate).unwrap();
        data.maintenance.iter().try_for_each(Entity::validate).unwrap();
        data.commands.iter().try_for_each(Entity::validate).unwrap();
        data.status_history.iter().try_for_each(Entity::validate).unwrap();
        data.reports.iter().try_for_each(Entity::validate).unwrap();
    }

    #[test]
    fn test_children_reference_generated_parents() {
        let data = dataset(&GeneratorOptions::default());
        let robots: HashSet<_> = data.robots.iter().map(|r| r.id.clone()).collect();
        let cameras: HashSet<_> = data.cameras.iter().map(|c| c.id.clone()).collect();

        assert_eq!(data.robots.len(), 10);
        assert!(data.sensor_data.iter().all(|s| robots.contains(&s.robot_id)));
        assert!(data.alerts.iter().all(|a| robots.contains(&a.robot_id)));
        assert!(data.maintenance.iter().all(|m| robots.contains(&m.robot_id)));
        assert!(data.cameras.iter().all(|c| robots.contains(&c.robot_id)));
        assert!(data.detections.iter().all(|d| cameras.contains(&d.camera_id)));
        assert!(data.status_history.iter().all(|h| robots.contains(&h.robot_id)));
        assert_eq!(data.team_members.len(), data.users.len());
    }

    #[test]
    fn test_robot_values_within_bounds() {
        let data = dataset(&GeneratorOptions::default());

        for robot in &data.robots {
            assert!((20.0..=100.0).contains(&robot.battery_level));
            let Some(Location::Geographic { latitude, longitude, .. }) = robot.location else {
                panic!("robot without geographic location");
            };
            assert!((SEOUL_LAT.0..=SEOUL_LAT.1).contains(&latitude));
            assert!((SEOUL_LNG.0..=SEOUL_LNG.1).contains(&longitude));
        }
    }

    #[test]
    fn test_sensor_readings_every_step() {
        let options = GeneratorOptions {
            robots: 2,
            sensor_hours: 2,
            sensor_step_minutes: 10,
            ..GeneratorOptions::default()
        };
        let data = dataset(&options);

        // 2h / 10min plus the reading at "now"
        assert_eq!(data.sensor_data.len(), 2 * 13);

        let first_robot = &data.robots[0].id;
        let times: Vec<_> = data
            .sensor_data
            .iter()
            .filter(|s| &s.robot_id == first_robot)
            .map(|s| s.created_at)
            .collect();
        assert!(times.windows(2).all(|w| w[1] - w[0] == Duration::minutes(10)));
    }

    #[test]
    fn test_per_robot_counts() {
        let data = dataset(&GeneratorOptions::default());

        for robot in &data.robots {
            let alerts = data.alerts.iter().filter(|a| a.robot_id == robot.id).count();
            let maintenance = data.maintenance.iter().filter(|m| m.robot_id == robot.id).count();
            let cameras = data.cameras.iter().filter(|c| c.robot_id == robot.id).count();
            assert!((1..=5).contains(&alerts));
            assert!((2..=4).contains(&maintenance));
            assert!((1..=2).contains(&cameras));
        }
    }

    #[test]
    fn test_maintenance_end_date_only_when_started() {
        let data = dataset(&GeneratorOptions::default());

        for record in &data.maintenance {
            let started = matches!(
                record.status,
                MaintenanceStatus::Completed | MaintenanceStatus::InProgress
            );
            assert_eq!(record.end_date.is_some(), started);
            assert!(record.parts_replaced.len() <= 3);
        }
    }

    #[test]
    fn test_latest_status_matches_robot() {
        let data = dataset(&GeneratorOptions::default());

        for robot in &data.robots {
            let latest = data
                .status_history
                .iter()
                .filter(|h| h.robot_id == robot.id)
                .max_by_key(|h| h.created_at)
                .unwrap();
            assert_eq!(latest.status, robot.status);
        }
    }

    #[test]
    fn test_report_summarises_detections() {
        let data = dataset(&GeneratorOptions::default());

        let report = &data.reports[0];
        assert_eq!(report.detection_summary.total as usize, data.detections.len());
        assert_eq!(report.project_id, data.projects[0].id);
    }

    #[test]
    fn test_camera_urls_follow_stream_type() {
        let options = GeneratorOptions {
            robots: 20,
            rtsp_port: 9554,
            http_port: 9080,
            stream_quality: StreamQuality::High,
            ..GeneratorOptions::default()
        };
        let data = dataset(&options);

        for camera in &data.cameras {
            let url = camera.stream_url.as_str();
            let (scheme, tail) = match camera.stream_type {
                StreamType::Rtsp => ("rtsp://camera-", ":9554/stream"),
                StreamType::Http => ("http://camera-", ":9080/stream"),
                StreamType::Webrtc => ("https://camera-", ".local/webrtc/stream"),
            };
            assert!(url.starts_with(scheme) && url.contains(tail), "{url}");
            assert_eq!(camera.quality, StreamQuality::High);
        }
    }
}
