//! Integration tests for configuration loading

use resq_monitor::infra::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_config_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();

    let config_content = r#"
[site]
id = "tower-west"

[feed]
url = "http://localhost:8080/data.json"
poll_interval_secs = 5
timeout_ms = 2000

[chat]
api_url = "http://localhost:9000/v1/chat/completions"
model = "test-model"
api_key_env = "TEST_CHAT_KEY"

[egress]
file = "/tmp/reports.jsonl"

[metrics]
interval_secs = 15
"#;

    temp_file.write_all(config_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.site_id(), "tower-west");
    assert_eq!(config.feed_url(), "http://localhost:8080/data.json");
    assert_eq!(config.feed_poll_interval_secs(), 5);
    assert_eq!(config.feed_timeout_ms(), 2000);
    assert_eq!(config.chat_model(), "test-model");
    assert_eq!(config.chat_api_key_env(), "TEST_CHAT_KEY");
    assert_eq!(config.egress_file(), "/tmp/reports.jsonl");
    assert_eq!(config.metrics_interval_secs(), 15);
}

#[test]
fn test_partial_config_fills_in_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[site]\nid = \"tower-east\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = Config::from_file(temp_file.path()).unwrap();

    assert_eq!(config.site_id(), "tower-east");
    assert_eq!(config.feed_url(), "https://bjong03.github.io/ResQDB/data.json");
    assert_eq!(config.feed_poll_interval_secs(), 30);
    assert_eq!(config.egress_file(), "classifications.jsonl");
}

#[test]
fn test_load_from_path_fallback() {
    let config = Config::load_from_path("/nonexistent/config.toml");
    assert_eq!(config.site_id(), "building");
    assert_eq!(config.feed_poll_interval_secs(), 30);
    assert_eq!(config.chat_api_key_env(), "OPENROUTER_API_KEY");
}
