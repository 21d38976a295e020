#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for loading and saving `AppConfig`.

use hse_enroll_app::{AppConfig, ConfigError};

#[tokio::test]
async fn missing_file_yields_defaults() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");

    let config = AppConfig::load_from(&tmp.path().join("config.json"))
        .await
        .unwrap();

    assert_eq!(config, AppConfig::default());
}

#[tokio::test]
async fn save_then_load_preserves_values() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("nested").join("config.json");

    let mut config = AppConfig::default();
    config.api.base_url = "https://enroll.example.org/api/".to_string();
    config.form.email_check_debounce_ms = 0;

    config.save_to(&path).await.unwrap();
    let loaded = AppConfig::load_from(&path).await.unwrap();

    assert_eq!(loaded, config);
}

#[tokio::test]
async fn saved_file_is_pretty_json() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("config.json");

    AppConfig::default().save_to(&path).await.unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains('\n'));
    assert!(content.contains("\"baseUrl\""));
    assert!(content.contains("\"emailCheckDebounceMs\""));
}

#[tokio::test]
async fn malformed_file_is_error() {
    let tmp = tempfile::tempdir().expect("failed to create temp dir");
    let path = tmp.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = AppConfig::load_from(&path).await.unwrap_err();

    assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
}
