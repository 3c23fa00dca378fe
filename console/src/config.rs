//! Console configuration
//!
//! All connection identity and host catalogs live in an explicit config
//! struct built at startup from an optional JSON file plus environment
//! overrides. Nothing here is module-level mutable state.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::catalog::{default_memory_limit_containers, default_services, ServiceDescriptor};
use crate::errors::ConsoleError;
use crate::logs::LogLevel;

/// Environment variable overrides
const ENV_HOST: &str = "FLEETOPS_HOST";
const ENV_USER: &str = "FLEETOPS_USER";
const ENV_IDENTITY: &str = "FLEETOPS_IDENTITY";

/// Console settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Target host address
    #[serde(default)]
    pub host: String,

    /// Login user on the target host
    #[serde(default = "default_user")]
    pub user: String,

    /// Path to the SSH identity file
    #[serde(default = "default_identity")]
    pub identity_file: String,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Number of containers expected to be running on a healthy host
    #[serde(default = "default_expected_containers")]
    pub expected_containers: usize,

    /// Known services on the host
    #[serde(default = "default_services")]
    pub services: Vec<ServiceDescriptor>,

    /// Relational database settings
    #[serde(default)]
    pub mysql: MysqlSettings,

    /// Key-value store settings
    #[serde(default)]
    pub redis: RedisSettings,

    /// Backup settings
    #[serde(default)]
    pub backup: BackupSettings,

    /// Monitoring dashboards
    #[serde(default = "default_dashboards")]
    pub dashboards: Vec<Dashboard>,

    /// Deployment settings
    #[serde(default)]
    pub deploy: DeploySettings,

    /// Containers checked for a memory cap by the optimize workflow
    #[serde(default = "default_memory_limit_containers")]
    pub memory_limit_containers: Vec<String>,
}

fn default_user() -> String {
    "ubuntu".to_string()
}

fn default_identity() -> String {
    "~/.ssh/id_rsa".to_string()
}

fn default_expected_containers() -> usize {
    7
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            user: default_user(),
            identity_file: default_identity(),
            log_level: LogLevel::Info,
            expected_containers: default_expected_containers(),
            services: default_services(),
            mysql: MysqlSettings::default(),
            redis: RedisSettings::default(),
            backup: BackupSettings::default(),
            dashboards: default_dashboards(),
            deploy: DeploySettings::default(),
            memory_limit_containers: default_memory_limit_containers(),
        }
    }
}

impl ConsoleConfig {
    /// Load configuration from `path`, or the default location when absent.
    ///
    /// A missing file yields the defaults; environment overrides are
    /// applied either way.
    pub async fn load(path: Option<&Path>) -> Result<Self, ConsoleError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        let mut config = if tokio::fs::metadata(&path).await.is_ok() {
            let contents = tokio::fs::read_to_string(&path).await?;
            serde_json::from_str(&contents)?
        } else {
            Self::default()
        };

        config.apply_env();
        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(host) = std::env::var(ENV_HOST) {
            self.host = host;
        }
        if let Ok(user) = std::env::var(ENV_USER) {
            self.user = user;
        }
        if let Ok(identity) = std::env::var(ENV_IDENTITY) {
            self.identity_file = identity;
        }
    }

    /// Validate that the config can reach a host at all.
    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.host.is_empty() {
            return Err(ConsoleError::ConfigError(format!(
                "no target host configured; set {} or pass --host",
                ENV_HOST
            )));
        }
        Ok(())
    }
}

/// Default config file location (`~/.config/fleetops/config.json`).
pub fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".config/fleetops/config.json")
}

/// Relational database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MysqlSettings {
    /// Container running the database engine
    #[serde(default = "default_mysql_container")]
    pub container: String,

    /// Database user
    #[serde(default = "default_mysql_user")]
    pub user: String,

    /// Database password
    #[serde(default = "default_mysql_password")]
    pub password: String,

    /// LIKE pattern for the database listing
    #[serde(default = "default_mysql_db_pattern")]
    pub db_pattern: String,
}

fn default_mysql_container() -> String {
    "test-mysql".to_string()
}

fn default_mysql_user() -> String {
    "root".to_string()
}

fn default_mysql_password() -> String {
    "test_mysql_password".to_string()
}

fn default_mysql_db_pattern() -> String {
    "jobfirst%".to_string()
}

impl Default for MysqlSettings {
    fn default() -> Self {
        Self {
            container: default_mysql_container(),
            user: default_mysql_user(),
            password: default_mysql_password(),
            db_pattern: default_mysql_db_pattern(),
        }
    }
}

/// Key-value store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisSettings {
    /// Container running the store
    #[serde(default = "default_redis_container")]
    pub container: String,

    /// Store password
    #[serde(default = "default_redis_password")]
    pub password: String,
}

fn default_redis_container() -> String {
    "test-redis".to_string()
}

fn default_redis_password() -> String {
    "test_redis_password".to_string()
}

impl Default for RedisSettings {
    fn default() -> Self {
        Self {
            container: default_redis_container(),
            password: default_redis_password(),
        }
    }
}

/// Backup settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSettings {
    /// Directory on the host where dumps are written
    #[serde(default = "default_backup_dir")]
    pub dir: String,

    /// Logical databases to dump
    #[serde(default = "default_backup_databases")]
    pub databases: Vec<String>,
}

fn default_backup_dir() -> String {
    "/opt/backups/databases".to_string()
}

fn default_backup_databases() -> Vec<String> {
    vec![
        "jobfirst_basic".to_string(),
        "jobfirst_professional".to_string(),
        "jobfirst_future".to_string(),
    ]
}

impl Default for BackupSettings {
    fn default() -> Self {
        Self {
            dir: default_backup_dir(),
            databases: default_backup_databases(),
        }
    }
}

/// A monitoring dashboard exposed by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// Display name
    pub name: String,

    /// Port the dashboard listens on
    pub port: u16,

    /// Whether the dashboard is served over HTTPS
    #[serde(default)]
    pub https: bool,
}

impl Dashboard {
    /// Build the dashboard URL for `host`.
    pub fn url(&self, host: &str) -> String {
        let scheme = if self.https { "https" } else { "http" };
        format!("{}://{}:{}", scheme, host, self.port)
    }
}

fn default_dashboards() -> Vec<Dashboard> {
    vec![
        Dashboard {
            name: "Grafana".to_string(),
            port: 3000,
            https: false,
        },
        Dashboard {
            name: "Portainer".to_string(),
            port: 9443,
            https: true,
        },
        Dashboard {
            name: "Prometheus".to_string(),
            port: 9090,
            https: false,
        },
    ]
}

/// Deployment settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploySettings {
    /// Local deployment script transferred to the host
    #[serde(default = "default_deploy_script")]
    pub script: String,

    /// Directory on the host the script is copied into
    #[serde(default = "default_deploy_remote_dir")]
    pub remote_dir: String,
}

fn default_deploy_script() -> String {
    "scripts/deploy_monitoring.sh".to_string()
}

fn default_deploy_remote_dir() -> String {
    "/tmp".to_string()
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            script: default_deploy_script(),
            remote_dir: default_deploy_remote_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ConsoleConfig::default();

        assert_eq!(config.user, "ubuntu");
        assert_eq!(config.expected_containers, 7);
        assert_eq!(config.services.len(), 2);
        assert_eq!(config.backup.databases.len(), 3);
        assert_eq!(config.dashboards[0].name, "Grafana");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_json_uses_defaults() {
        let config: ConsoleConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.user, "ubuntu");
        assert_eq!(config.mysql.container, "test-mysql");
        assert_eq!(config.redis.container, "test-redis");
    }

    #[test]
    fn test_dashboard_url() {
        let dash = Dashboard {
            name: "Portainer".to_string(),
            port: 9443,
            https: true,
        };
        assert_eq!(dash.url("10.0.0.5"), "https://10.0.0.5:9443");
    }
}
