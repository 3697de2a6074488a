//! Application layer - Fleet use cases and business workflows

pub mod dashboard;
pub mod report_service;
pub mod repository;
pub mod robot_service;
pub mod seed;

pub use dashboard::{DashboardService, DashboardStats};
pub use report_service::ReportService;
pub use repository::FleetRepository;
pub use robot_service::{HealthSummary, RobotService};
pub use seed::{copy_fleet, seed_dataset};
