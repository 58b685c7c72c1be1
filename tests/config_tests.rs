//! Configuration loading from disk

use medal_helper::config::{AppConfig, ConfigLoader};
use medal_helper::engine::ConcurrencyMode;
use medal_helper::error::Error;
use std::time::Duration;
use tempfile::TempDir;

async fn load(content: &str) -> medal_helper::error::Result<AppConfig> {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    tokio::fs::write(&path, content).await.unwrap();
    ConfigLoader::new().with_path(&path).without_env().load().await
}

#[tokio::test]
async fn test_full_file_round_trip() {
    let config = load(
        r#"
        log_level = "warn"

        [engine]
        mode = "concurrent"
        retry_interval_secs = 10
        max_retries = 3
        max_parallel = 4

        [watch]
        heartbeat_interval = "2m 30s"
        api_base = "http://gateway.local"

        [[accounts]]
        access_key = "first-key-0000"
        allowed_uids = [1, 2]

        [[accounts]]
        access_key = "second-key-0000"
        push = "ops"
        banned_uids = [9]

        [push.ops]
        url = "https://hooks.example/notify"
        "#,
    )
    .await
    .unwrap();

    assert_eq!(config.log_level.as_deref(), Some("warn"));
    assert_eq!(config.engine.mode, ConcurrencyMode::Concurrent);
    assert_eq!(config.engine.backoff().max_retries(), 3);
    assert_eq!(config.watch.heartbeat_interval, Duration::from_secs(150));
    assert_eq!(config.accounts.len(), 2);
    assert_eq!(config.accounts[0].allowed_uids, vec![1, 2]);
    assert_eq!(config.accounts[1].push.as_deref(), Some("ops"));
    assert!(config.push.contains_key("ops"));
}

#[tokio::test]
async fn test_zero_heartbeat_interval_is_rejected() {
    let result = load(
        "[watch]\nheartbeat_interval = \"0s\"\n\n[[accounts]]\naccess_key = \"k\"\n",
    )
    .await;

    match result {
        Err(Error::InvalidConfiguration { field, .. }) => {
            assert_eq!(field, "watch.heartbeat_interval")
        }
        other => panic!("expected invalid configuration, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_toml_reports_parse_error() {
    let result = load("[[accounts]\naccess_key = ").await;
    assert!(matches!(result, Err(Error::Toml(_))));
}

#[tokio::test]
async fn test_negative_retry_count_does_not_parse() {
    let result = load("[engine]\nmax_retries = -1\n\n[[accounts]]\naccess_key = \"k\"\n").await;
    assert!(matches!(result, Err(Error::Toml(_))));
}
