//! Configuration file loading tests

use fleetops::config::ConsoleConfig;
use fleetops::errors::ConsoleError;

#[tokio::test]
async fn load_reads_overrides_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(
        &path,
        r#"{
            "host": "10.1.2.3",
            "expected_containers": 9,
            "log_level": "warn",
            "mysql": { "container": "prod-mysql" }
        }"#,
    )
    .await
    .unwrap();

    let config = ConsoleConfig::load(Some(&path)).await.unwrap();

    assert_eq!(config.host, "10.1.2.3");
    assert_eq!(config.expected_containers, 9);
    assert_eq!(config.log_level, fleetops::logs::LogLevel::Warn);
    assert_eq!(config.mysql.container, "prod-mysql");
    // unspecified fields keep their defaults
    assert_eq!(config.user, "ubuntu");
    assert_eq!(config.mysql.user, "root");
    assert!(config.validate().is_ok());
}

#[tokio::test]
async fn load_missing_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let config = ConsoleConfig::load(Some(&path)).await.unwrap();

    assert_eq!(config.expected_containers, 7);
    assert_eq!(config.services.len(), 2);
}

#[tokio::test]
async fn load_rejects_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    tokio::fs::write(&path, "not json at all").await.unwrap();

    let result = ConsoleConfig::load(Some(&path)).await;
    assert!(matches!(result, Err(ConsoleError::JsonError(_))));
}
