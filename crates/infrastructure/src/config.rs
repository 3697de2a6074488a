use config::{Config, ConfigError, Environment, File};
use domain::{BatteryAlertPolicy, StreamQuality};
use serde::{Deserialize, Serialize};

/// Which store the fleet layer talks to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Sqlite,
    Dynamodb,
    Memory,
}

impl Default for BackendKind {
    fn default() -> Self {
        Self::Sqlite
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "dynamodb" => Ok(Self::Dynamodb),
            "memory" => Ok(Self::Memory),
            other => Err(format!(
                "unknown backend '{other}' (expected sqlite, dynamodb or memory)"
            )),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SqliteConfig {
    #[serde(default = "default_sqlite_url")]
    pub url: String,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            url: default_sqlite_url(),
        }
    }
}

fn default_sqlite_url() -> String {
    "sqlite://robot_monitoring.db?mode=rwc".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DynamoConfig {
    #[serde(default = "default_region")]
    pub region: String,
    #[serde(default = "default_table_name")]
    pub table_name: String,
    /// Override for DynamoDB Local and similar emulators
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

impl Default for DynamoConfig {
    fn default() -> Self {
        Self {
            region: default_region(),
            table_name: default_table_name(),
            endpoint_url: None,
        }
    }
}

fn default_region() -> String {
    std::env::var("AWS_REGION").unwrap_or_else(|_| "ap-northeast-2".to_string())
}

fn default_table_name() -> String {
    "RobotMonitoring".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CameraStreamConfig {
    #[serde(default = "default_rtsp_port")]
    pub rtsp_port: u16,
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    /// Quality new cameras stream at
    #[serde(default)]
    pub stream_quality: StreamQuality,
}

impl Default for CameraStreamConfig {
    fn default() -> Self {
        Self {
            rtsp_port: default_rtsp_port(),
            http_port: default_http_port(),
            stream_quality: StreamQuality::default(),
        }
    }
}

fn default_rtsp_port() -> u16 {
    8554
}
fn default_http_port() -> u16 {
    8080
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AlertConfig {
    #[serde(default = "default_warning_battery")]
    pub warning_battery: f64,
    #[serde(default = "default_critical_battery")]
    pub critical_battery: f64,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            warning_battery: default_warning_battery(),
            critical_battery: default_critical_battery(),
        }
    }
}

fn default_warning_battery() -> f64 {
    20.0
}
fn default_critical_battery() -> f64 {
    10.0
}

impl AlertConfig {
    pub fn battery_policy(&self) -> BatteryAlertPolicy {
        BatteryAlertPolicy {
            warning_below: self.warning_battery,
            critical_below: self.critical_battery,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FleetConfig {
    #[serde(default)]
    pub backend: BackendKind,
    #[serde(default)]
    pub sqlite: SqliteConfig,
    #[serde(default)]
    pub dynamodb: DynamoConfig,
    #[serde(default)]
    pub camera: CameraStreamConfig,
    #[serde(default)]
    pub alerts: AlertConfig,
}

impl FleetConfig {
    pub fn load(config_dir: &str) -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = Config::builder()
            .set_default("backend", "sqlite")?
            // Shared defaults, e.g. config/default.toml
            .add_source(File::with_name(&format!("{}/default", config_dir)).required(false))
            // Per-environment overrides, e.g. config/production.toml
            .add_source(File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false))
            // Environment variables (e.g. FLEET__DYNAMODB__TABLE_NAME=Robots)
            .add_source(Environment::with_prefix("FLEET").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_files() {
        let config = FleetConfig::load("/nonexistent-fleet-config").unwrap();
        assert_eq!(config.camera.rtsp_port, 8554);
        assert_eq!(config.camera.http_port, 8080);
        assert_eq!(config.camera.stream_quality, StreamQuality::Medium);
        assert_eq!(config.dynamodb.table_name, "RobotMonitoring");
        assert_eq!(config.alerts.battery_policy(), BatteryAlertPolicy::default());
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!("SQLite".parse::<BackendKind>(), Ok(BackendKind::Sqlite));
        assert_eq!("dynamodb".parse::<BackendKind>(), Ok(BackendKind::Dynamodb));
        assert!("postgres".parse::<BackendKind>().is_err());
    }
}
