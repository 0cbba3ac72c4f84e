//! Snapshot feed client
//!
//! Fetches the raw device/occupant snapshot over HTTP. Transport failures
//! (connection errors, non-OK status, malformed JSON, a non-object root)
//! are propagated to the caller; nothing here masks them. A successful
//! fetch hands the owned mapping to the classification core.

use crate::infra::config::Config;
use anyhow::{bail, Context};
use serde_json::{Map, Value};
use std::time::Duration;
use tracing::debug;

pub struct FeedClient {
    client: reqwest::Client,
    url: String,
}

impl FeedClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        // Create the HTTP client once for reuse (connection pooling)
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.feed_timeout_ms()))
            .build()
            .context("Failed to build feed HTTP client")?;

        Ok(Self { client, url: config.feed_url().to_string() })
    }

    /// Fetch and parse one snapshot
    pub async fn fetch_snapshot(&self) -> anyhow::Result<Map<String, Value>> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("snapshot request to {} failed", self.url))?
            .error_for_status()
            .context("snapshot endpoint returned error status")?;

        let body = response.text().await.context("failed to read snapshot body")?;
        let snapshot = parse_snapshot(&body)?;

        debug!(url = %self.url, records = %snapshot.len(), "snapshot_fetched");
        Ok(snapshot)
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Parse a snapshot body into the raw record mapping.
///
/// The transport enforces no schema on the records themselves; the only
/// structural requirement is a JSON object at the root, keyed by
/// device/person identifier. Key order of the document is preserved.
pub fn parse_snapshot(body: &str) -> anyhow::Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(body).context("snapshot body is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => bail!("snapshot root must be a JSON object, got {}", json_type(&other)),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
