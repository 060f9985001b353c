use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use tuner_options::*;

#[test]
fn test_load_settings_from_toml() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("service.toml");
    fs::write(
        &path,
        "address = \"svc.internal:9000\"\ntimeout = \"45s\"\nretries = 7\ncache_enabled = false\n",
    )
    .unwrap();

    let settings = load_settings(Some(path.as_path())).unwrap();

    assert_eq!(settings.address.as_deref(), Some("svc.internal:9000"));
    assert_eq!(settings.timeout, Some(Duration::from_secs(45)));
    assert_eq!(settings.retries, Some(7));
    assert_eq!(settings.cache_enabled, Some(false));
    assert_eq!(settings.log_level, None);
}

#[test]
fn test_load_settings_from_json() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("service.json");
    fs::write(&path, r#"{ "log_level": "warn", "retries": 0 }"#).unwrap();

    let settings = load_settings(Some(path.as_path())).unwrap();
    let service = Service::new("localhost:8080", settings.to_options());

    assert_eq!(service.retries(), 0);
    assert_eq!(service.log_level(), &LogLevel::WARN);
    assert_eq!(service.timeout(), DEFAULT_TIMEOUT);
}

#[test]
fn test_settings_are_overridden_by_later_options() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("service.toml");
    fs::write(&path, "retries = 7\nlog_level = \"error\"\n").unwrap();

    let mut options = load_settings(Some(path.as_path())).unwrap().to_options();
    options.push(with_retries(1));

    let service = Service::new("localhost:8080", options);
    assert_eq!(service.retries(), 1);
    assert_eq!(service.log_level(), &LogLevel::ERROR);
}

#[test]
fn test_malformed_duration_is_a_config_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("service.toml");
    fs::write(&path, "timeout = \"eventually\"\n").unwrap();

    let err = load_settings(Some(path.as_path())).unwrap_err();
    assert!(matches!(err, SettingsError::Config { .. }), "{err:?}");
    assert!(err.to_string().contains("Failed to deserialize settings"));
}

#[test]
fn test_missing_settings_file() {
    let temp = TempDir::new().unwrap();
    let err = load_settings(Some(temp.path().join("absent.toml").as_path())).unwrap_err();
    match err {
        SettingsError::FileNotFound { .. } => {},
        other => panic!("unexpected error: {other:?}"),
    }
}
