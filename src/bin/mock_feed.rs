//! Mock snapshot feed server
//!
//! Serves a canned device/occupant snapshot for local development, matching
//! the production feed's shape: spaced field names, mixed record kinds, one
//! record that classifies as neither.
//!
//! Usage:
//!   cargo run --bin mock-feed -- --port 8080
//! then point `[feed] url` at http://localhost:8080/data.json

use bytes::Bytes;
use clap::Parser;
use http_body_util::Full;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SNAPSHOT: &str = r#"{
  "Smoke Detector 12": {"Unit": 5, "Is On": true, "Fire Detected": true, "Is Exit": false, "Last Notification": "2024-06-01T12:03:00Z"},
  "Door Sensor 3": {"Unit": 2, "Is On": false, "Fire Detected": false, "Is Exit": true},
  "Exit Camera 1": {"Unit": 5, "Is On": true, "Fire Detected": true, "Is Exit": true},
  "Thermostat 7": {"Unit": 9, "Is On": true, "Fire Detected": false, "Is Exit": false},
  "Elevator Beacon": {"Floor": 3, "Occupied": false},
  "p-204": {"Name": "Jane Morrison", "DOB": "1990-01-01", "Unit": 5, "Medical Conditions": "Mobility"},
  "p-117": {"Name": "Ed Alvarez", "DOB": "1954-07-19", "Unit": 2, "Medical Conditions": "Hearing"}
}"#;

#[derive(Parser, Debug)]
#[command(name = "mock-feed", about = "Mock snapshot feed for local development")]
struct Args {
    /// TCP port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,
}

async fn handle_request(
    req: Request<hyper::body::Incoming>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    match (req.method(), req.uri().path()) {
        (&Method::GET, "/data.json") => Ok(Response::builder()
            .status(StatusCode::OK)
            .header("Content-Type", "application/json")
            .body(Full::new(Bytes::from_static(SNAPSHOT.as_bytes())))
            .expect("static response should not fail")),
        (&Method::GET, "/health") => Ok(Response::builder()
            .status(StatusCode::OK)
            .body(Full::new(Bytes::from("ok")))
            .expect("static response should not fail")),
        _ => Ok(Response::builder()
            .status(StatusCode::NOT_FOUND)
            .body(Full::new(Bytes::from("not found")))
            .expect("static response should not fail")),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    let args = Args::parse();
    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    let listener = TcpListener::bind(addr).await?;

    info!(port = %args.port, "mock_feed_started");

    loop {
        match listener.accept().await {
            Ok((stream, _addr)) => {
                let io = TokioIo::new(stream);
                tokio::spawn(async move {
                    let service = service_fn(handle_request);
                    if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                        error!(error = %e, "mock_feed_http_error");
                    }
                });
            }
            Err(e) => {
                error!(error = %e, "mock_feed_accept_error");
            }
        }
    }
}
