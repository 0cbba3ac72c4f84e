//! Building assistant CLI
//!
//! Fetches the current snapshot, assembles it (plus an optional
//! building-model device file) into prompt context, and asks the configured
//! chat-completions API. The raw snapshot is forwarded as-is; the
//! classification core is not involved.
//!
//! Usage:
//!   cargo run --bin resq-ask -- "List all fire alarms"

use anyhow::Context;
use clap::Parser;
use resq_monitor::infra::Config;
use resq_monitor::io::{build_context, AssistantClient, FeedClient};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "resq-ask", about = "Ask about the building's current snapshot")]
struct Args {
    /// Question for the assistant
    question: String,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,

    /// Optional JSON file with building-model devices to include as context
    #[arg(long)]
    model_data: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Keep log noise off stdout; the reply is the output
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    let feed = FeedClient::new(&config)?;
    let snapshot = feed.fetch_snapshot().await?;

    let model_data: Option<Value> = match &args.model_data {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read model data file {}", path))?;
            let devices = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse model data file {}", path))?;
            Some(devices)
        }
        None => None,
    };

    let context = build_context(&snapshot, model_data.as_ref(), &args.question);

    let assistant = AssistantClient::new(&config)?;
    let reply = assistant.ask(&context).await?;

    println!("{}", reply);
    Ok(())
}
