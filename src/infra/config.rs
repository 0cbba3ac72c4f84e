//! Configuration loading from TOML files
//!
//! Config file is selected via:
//! 1. --config <path> command line argument
//! 2. CONFIG_FILE environment variable
//! 3. Default: config/dev.toml
//!
//! Every section is optional; a missing or unreadable file falls back to
//! compiled defaults with a warning so local runs work out of the box.

use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Building identifier carried on egress records and log lines
    #[serde(default = "default_site_id")]
    pub id: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { id: default_site_id() }
    }
}

fn default_site_id() -> String {
    "building".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    /// Snapshot endpoint (unauthenticated GET)
    #[serde(default = "default_feed_url")]
    pub url: String,
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    #[serde(default = "default_feed_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: default_feed_url(),
            poll_interval_secs: default_poll_interval_secs(),
            timeout_ms: default_feed_timeout_ms(),
        }
    }
}

fn default_feed_url() -> String {
    "https://bjong03.github.io/ResQDB/data.json".to_string()
}

fn default_poll_interval_secs() -> u64 {
    30
}

fn default_feed_timeout_ms() -> u64 {
    5000
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatConfig {
    /// Chat-completions endpoint (OpenRouter compatible)
    #[serde(default = "default_chat_api_url")]
    pub api_url: String,
    #[serde(default = "default_chat_model")]
    pub model: String,
    /// Environment variable holding the bearer token; requests go out
    /// unauthenticated when it is unset
    #[serde(default = "default_chat_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_chat_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_url: default_chat_api_url(),
            model: default_chat_model(),
            api_key_env: default_chat_api_key_env(),
            timeout_ms: default_chat_timeout_ms(),
        }
    }
}

fn default_chat_api_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_chat_model() -> String {
    "google/gemma-3-27b-it:free".to_string()
}

fn default_chat_api_key_env() -> String {
    "OPENROUTER_API_KEY".to_string()
}

fn default_chat_timeout_ms() -> u64 {
    30_000
}

#[derive(Debug, Clone, Deserialize)]
pub struct EgressConfig {
    /// File path for classification reports (JSONL format)
    #[serde(default = "default_egress_file")]
    pub file: String,
}

impl Default for EgressConfig {
    fn default() -> Self {
        Self { file: default_egress_file() }
    }
}

fn default_egress_file() -> String {
    "classifications.jsonl".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MetricsConfig {
    #[serde(default = "default_metrics_interval_secs")]
    pub interval_secs: u64,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { interval_secs: default_metrics_interval_secs() }
    }
}

fn default_metrics_interval_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct TomlConfig {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub egress: EgressConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
}

/// Main configuration struct used throughout the application
#[derive(Debug, Clone)]
pub struct Config {
    site_id: String,
    feed_url: String,
    feed_poll_interval_secs: u64,
    feed_timeout_ms: u64,
    chat_api_url: String,
    chat_model: String,
    chat_api_key_env: String,
    chat_timeout_ms: u64,
    egress_file: String,
    metrics_interval_secs: u64,
    config_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_toml(TomlConfig::default(), "default")
    }
}

impl Config {
    fn from_toml(toml_config: TomlConfig, config_file: &str) -> Self {
        Self {
            site_id: toml_config.site.id,
            feed_url: toml_config.feed.url,
            feed_poll_interval_secs: toml_config.feed.poll_interval_secs,
            feed_timeout_ms: toml_config.feed.timeout_ms,
            chat_api_url: toml_config.chat.api_url,
            chat_model: toml_config.chat.model,
            chat_api_key_env: toml_config.chat.api_key_env,
            chat_timeout_ms: toml_config.chat.timeout_ms,
            egress_file: toml_config.egress.file,
            metrics_interval_secs: toml_config.metrics.interval_secs,
            config_file: config_file.to_string(),
        }
    }

    /// Determine config file path from args or environment
    pub fn resolve_config_path(args: &[String]) -> String {
        for (i, arg) in args.iter().enumerate() {
            if arg == "--config" {
                if let Some(path) = args.get(i + 1) {
                    return path.clone();
                }
            }
            if let Some(path) = arg.strip_prefix("--config=") {
                return path.to_string();
            }
        }

        if let Ok(path) = env::var("CONFIG_FILE") {
            return path;
        }

        "config/dev.toml".to_string()
    }

    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        let toml_config: TomlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        Ok(Self::from_toml(toml_config, &path.display().to_string()))
    }

    /// Load configuration - tries the TOML file first, falls back to defaults
    pub fn load_from_path(path: &str) -> Self {
        match Self::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Warning: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    // Getters for all config fields
    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn feed_url(&self) -> &str {
        &self.feed_url
    }

    pub fn feed_poll_interval_secs(&self) -> u64 {
        self.feed_poll_interval_secs
    }

    pub fn feed_timeout_ms(&self) -> u64 {
        self.feed_timeout_ms
    }

    pub fn chat_api_url(&self) -> &str {
        &self.chat_api_url
    }

    pub fn chat_model(&self) -> &str {
        &self.chat_model
    }

    pub fn chat_api_key_env(&self) -> &str {
        &self.chat_api_key_env
    }

    pub fn chat_timeout_ms(&self) -> u64 {
        self.chat_timeout_ms
    }

    pub fn egress_file(&self) -> &str {
        &self.egress_file
    }

    pub fn metrics_interval_secs(&self) -> u64 {
        self.metrics_interval_secs
    }

    pub fn config_file(&self) -> &str {
        &self.config_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site_id(), "building");
        assert_eq!(config.feed_url(), "https://bjong03.github.io/ResQDB/data.json");
        assert_eq!(config.feed_poll_interval_secs(), 30);
        assert_eq!(config.egress_file(), "classifications.jsonl");
        assert_eq!(config.chat_api_key_env(), "OPENROUTER_API_KEY");
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let toml_config: TomlConfig = toml::from_str("").unwrap();
        let config = Config::from_toml(toml_config, "empty");
        assert_eq!(config.feed_poll_interval_secs(), 30);
        assert_eq!(config.metrics_interval_secs(), 60);
    }

    #[test]
    fn test_resolve_config_path_from_args() {
        let args = vec!["--config".to_string(), "/tmp/x.toml".to_string()];
        assert_eq!(Config::resolve_config_path(&args), "/tmp/x.toml");

        let args = vec!["--config=/tmp/y.toml".to_string()];
        assert_eq!(Config::resolve_config_path(&args), "/tmp/y.toml");
    }
}
