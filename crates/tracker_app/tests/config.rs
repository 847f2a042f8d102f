use std::fs;
use std::time::Duration;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use tracker_app::platform::config::{AppConfig, ConfigError, ConfigSource, LogDestination};

#[test]
fn missing_file_yields_defaults() {
    let temp = TempDir::new().unwrap();
    let (config, source) = AppConfig::load(&temp.path().join("absent.ron")).unwrap();
    assert_eq!(source, ConfigSource::Defaults);
    assert_eq!(config, AppConfig::default());
    assert_eq!(config.debounce(), Duration::from_millis(300));
    assert_eq!(config.log_destination, LogDestination::File);
}

#[test]
fn partial_file_fills_in_defaults() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("job_tracker.ron");
    fs::write(
        &path,
        r#"(base_url: "http://tracker.internal:8080", debounce_ms: 150, log_destination: Both)"#,
    )
    .unwrap();

    let (config, source) = AppConfig::load(&path).unwrap();
    assert_eq!(source, ConfigSource::File(path.clone()));
    assert_eq!(config.base_url, "http://tracker.internal:8080");
    assert_eq!(config.debounce(), Duration::from_millis(150));
    assert_eq!(config.log_destination, LogDestination::Both);
    assert!(config.check_session_on_start);

    let settings = config.backend_settings();
    assert_eq!(settings.base_url, "http://tracker.internal:8080");
    assert_eq!(settings.request_timeout, Duration::from_secs(30));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("job_tracker.ron");
    fs::write(&path, "(base_url: 42").unwrap();

    let err = AppConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}
