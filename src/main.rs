//! ResQ monitor - building safety snapshot classifier
//!
//! Polls the device/occupant snapshot feed, classifies each snapshot into
//! alerts and an occupant directory, derives the units currently on fire,
//! and appends one report per snapshot to the JSONL egress file.
//!
//! Module structure:
//! - `domain/` - Core types (RecordClass, Alert, Resident, UnitId)
//! - `io/` - External interfaces (Feed, Chat, Egress)
//! - `services/` - Business logic (Aggregator, AlertRule, FireUnits)
//! - `infra/` - Infrastructure (Config, Metrics)

use clap::Parser;
use resq_monitor::infra::{Config, Metrics};
use resq_monitor::io::{ClassificationReport, Egress, FeedClient};
use resq_monitor::services;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// ResQ monitor - building safety snapshot classifier
#[derive(Parser, Debug)]
#[command(name = "resq-monitor", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,

    /// Fetch and classify a single snapshot, then exit
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    // Default: INFO, use RUST_LOG=debug for full fetch visibility
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(git = %env!("GIT_HASH"), "resq-monitor starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        site = %config.site_id(),
        feed_url = %config.feed_url(),
        poll_interval_secs = %config.feed_poll_interval_secs(),
        egress_file = %config.egress_file(),
        metrics_interval_secs = %config.metrics_interval_secs(),
        "config_loaded"
    );

    let feed = FeedClient::new(&config)?;
    let egress = Egress::new(config.egress_file());
    let metrics = Arc::new(Metrics::new());

    if args.once {
        run_cycle(&config, &feed, &egress, &metrics).await;
        metrics.report().log();
        return Ok(());
    }

    // Create shutdown signal
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("shutdown_signal_received");
        let _ = shutdown_tx.send(true);
    });

    // Periodic metrics reporter
    let reporter_metrics = metrics.clone();
    let metrics_interval = config.metrics_interval_secs();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(metrics_interval));
        loop {
            interval.tick().await;
            reporter_metrics.report().log();
        }
    });

    let mut poll_interval =
        tokio::time::interval(std::time::Duration::from_secs(config.feed_poll_interval_secs()));

    loop {
        tokio::select! {
            _ = poll_interval.tick() => {
                run_cycle(&config, &feed, &egress, &metrics).await;
            }
            _ = shutdown_rx.changed() => {
                if *shutdown_rx.borrow() {
                    break;
                }
            }
        }
    }

    info!("resq-monitor shutdown complete");
    Ok(())
}

/// Fetch one snapshot, classify it, and egress the report
async fn run_cycle(config: &Config, feed: &FeedClient, egress: &Egress, metrics: &Metrics) {
    let snapshot = match feed.fetch_snapshot().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            metrics.record_fetch_failure();
            error!(url = %feed.url(), error = %e, "snapshot_fetch_failed");
            return;
        }
    };
    let fetched_at = chrono::Utc::now();

    let classify_start = Instant::now();
    let classified = services::aggregate(&snapshot);
    let burning = services::fire_units(&classified.alerts);
    let latency_us = classify_start.elapsed().as_micros() as u64;

    metrics.record_classification(
        snapshot.len() as u64,
        &classified.alerts,
        classified.directory.len() as u64,
        latency_us,
    );

    let report = ClassificationReport::new(config.site_id(), fetched_at, &classified, &burning);

    info!(
        records = %snapshot.len(),
        alerts = %classified.alerts.len(),
        directory = %classified.directory.len(),
        fire_units = ?report.fire_units,
        latency_us = %latency_us,
        "snapshot_classified"
    );

    egress.write_report(&report);
}
