//! SeaORM entities, one table per record kind
//!
//! Column names equal the record's field names so rows convert to and from
//! documents through serde.

pub mod alerts;
pub mod cameras;
pub mod command_history;
pub mod detection_results;
pub mod maintenance_records;
pub mod projects;
pub mod reports;
pub mod robot_status_history;
pub mod robots;
pub mod sensor_data;
pub mod team_members;
pub mod teams;
pub mod users;
