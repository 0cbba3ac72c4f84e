//! Chat assistant integration
//!
//! Forwards the raw snapshot (not the classified output) as prompt context
//! to an OpenRouter-compatible chat-completions API, optionally alongside a
//! building-model device feed. Pass-through consumer; it imposes no
//! contract on the classification core.

use crate::infra::config::Config;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Write;
use std::time::Duration;

const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes emergency alerts, \
                             smart sensors, and occupancy from a digital twin model.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: String,
}

/// Assemble the natural-language context for one question.
pub fn build_context(
    snapshot: &Map<String, Value>,
    model_data: Option<&Value>,
    question: &str,
) -> String {
    let snapshot_json = serde_json::to_string_pretty(snapshot).unwrap_or_default();

    let mut context = String::with_capacity(snapshot_json.len() + 256);
    let _ = writeln!(context, "Here is sensor data from a digital twin:");
    let _ = writeln!(context, "JSON Device Data: {}", snapshot_json);
    if let Some(devices) = model_data {
        let devices_json = serde_json::to_string_pretty(devices).unwrap_or_default();
        let _ = writeln!(context, "Model Devices: {}", devices_json);
    }
    let _ = writeln!(context, "Question: {}", question);
    context
}

pub struct AssistantClient {
    client: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl AssistantClient {
    /// Build a client from config; the bearer token is read from the
    /// configured environment variable and omitted when unset.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.chat_timeout_ms()))
            .build()
            .context("Failed to build chat HTTP client")?;

        Ok(Self {
            client,
            api_url: config.chat_api_url().to_string(),
            model: config.chat_model().to_string(),
            api_key: std::env::var(config.chat_api_key_env()).ok(),
        })
    }

    /// Send one assembled context; returns the assistant's reply text.
    pub async fn ask(&self, context: &str) -> anyhow::Result<String> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: context },
            ],
        };

        let mut post = self.client.post(&self.api_url).json(&request);
        if let Some(ref key) = self.api_key {
            post = post.bearer_auth(key);
        }

        let response = post
            .send()
            .await
            .with_context(|| format!("chat request to {} failed", self.api_url))?
            .error_for_status()
            .context("chat endpoint returned error status")?;

        let body: ChatResponse = response.json().await.context("chat response is not valid JSON")?;
        Ok(extract_reply(body))
    }
}

fn extract_reply(response: ChatResponse) -> String {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .unwrap_or_else(|| "No response.".to_string())
}
