//! Larvae Monitoring HTTP Server Binary
//!
//! Main entry point for the monitoring backend. It initializes the
//! repository, seeds the default account and demo data, starts the MQTT
//! ingestion bridge, and serves the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin larvae-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)
//! - `MQTT_HOST` / `MQTT_PORT` / `MQTT_TOPIC`: Broker settings
//! - `MQTT_ENABLED`: Set to `false` to run without the broker bridge

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use larvae_monitor::db::{seed, RepositoryFactory};
use larvae_monitor::http::{create_router, AppState};
use larvae_monitor::ingest::{self, MqttConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting larvae monitoring server");

    // Construct the repository and run the explicit one-time setup:
    // default account plus demo data when the store is empty.
    let repository = RepositoryFactory::create_local();
    seed::initialize(repository.as_ref())
        .await
        .map_err(|e| anyhow::anyhow!(e))?;
    info!("Repository initialized and seeded");

    // Bridge the broker topic into the same store the HTTP path writes to.
    let mqtt_config = MqttConfig::from_env();
    if mqtt_config.enabled {
        let mqtt_repo = repository.clone();
        tokio::spawn(async move {
            if let Err(e) = ingest::run_subscriber(mqtt_config, mqtt_repo).await {
                tracing::error!(error = %e, "MQTT subscriber terminated");
            }
        });
    } else {
        info!("MQTT ingestion disabled");
    }

    // Create application state and router
    let state = AppState::new(repository);
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
