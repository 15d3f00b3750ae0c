//! MQTT ingestion bridge.
//!
//! Subscribes to the broker topic the measurement devices publish on and
//! writes valid payloads into the same repository the HTTP path uses.
//! Delivery is fire-and-forget: a payload that fails to parse, misses a
//! required key, or cannot be stored is logged and dropped — no error is
//! ever surfaced to the publisher.

use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::env;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::TrayId;
use crate::db::models::NewMeasurement;
use crate::db::repository::FullRepository;
use crate::http::dto::IngestMeasurementRequest;

/// Default public broker and topic, matching the measurement devices.
pub const DEFAULT_BROKER_HOST: &str = "broker.hivemq.com";
pub const DEFAULT_BROKER_PORT: u16 = 1883;
pub const DEFAULT_TOPIC: &str = "bsf_monitor/larvae_data";

/// Broker connection configuration.
#[derive(Debug, Clone)]
pub struct MqttConfig {
    pub host: String,
    pub port: u16,
    pub topic: String,
    pub client_id: String,
    /// When false the subscriber task is not started at all.
    pub enabled: bool,
}

impl MqttConfig {
    /// Read configuration from `MQTT_*` environment variables, falling
    /// back to the device defaults.
    pub fn from_env() -> Self {
        Self {
            host: env::var("MQTT_HOST").unwrap_or_else(|_| DEFAULT_BROKER_HOST.to_string()),
            port: env::var("MQTT_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_BROKER_PORT),
            topic: env::var("MQTT_TOPIC").unwrap_or_else(|_| DEFAULT_TOPIC.to_string()),
            client_id: format!("larvae-monitor-{}", Uuid::new_v4().simple()),
            enabled: env::var("MQTT_ENABLED")
                .map(|s| !matches!(s.to_lowercase().as_str(), "false" | "0" | "no"))
                .unwrap_or(true),
        }
    }
}

/// Outcome of handling one broker payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadOutcome {
    /// Stored under the given record id.
    Stored(i64),
    /// Dropped: malformed, invalid, or unstorable. Nothing was written.
    Dropped,
}

/// Validate and store one broker payload.
///
/// Factored out of the subscriber loop so the fire-and-forget semantics
/// are testable without a broker. The record is stamped with the current
/// UTC time; device payloads carry no timestamp.
pub async fn handle_payload(repo: &dyn FullRepository, payload: &[u8]) -> PayloadOutcome {
    let request: IngestMeasurementRequest = match serde_json::from_slice(payload) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "dropping broker payload: malformed or missing required keys");
            return PayloadOutcome::Dropped;
        }
    };

    if let Err(reason) = request.validate() {
        warn!(%reason, "dropping broker payload: validation failed");
        return PayloadOutcome::Dropped;
    }

    let new_measurement = NewMeasurement {
        tray: TrayId::new(request.tray_number),
        length: request.length,
        width: request.width,
        area: request.area,
        weight: request.weight,
        count: request.count,
        captured_at: None,
    };

    match repo.insert_measurement(&new_measurement).await {
        Ok(stored) => {
            info!(tray = %stored.tray, id = stored.id, "stored measurement from broker");
            PayloadOutcome::Stored(stored.id)
        }
        Err(e) => {
            // Write rolled back; the publisher is never notified.
            warn!(error = %e, "dropping broker payload: storage failure");
            PayloadOutcome::Dropped
        }
    }
}

/// Run the subscriber loop until the process exits.
///
/// Reconnections are handled by resubscribing on every connection
/// acknowledgement; transient poll errors back off briefly and retry.
pub async fn run_subscriber(
    config: MqttConfig,
    repo: Arc<dyn FullRepository>,
) -> anyhow::Result<()> {
    let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
    options.set_keep_alive(Duration::from_secs(60));

    let (client, mut event_loop) = AsyncClient::new(options, 16);
    info!(
        host = %config.host,
        port = config.port,
        topic = %config.topic,
        "starting MQTT subscriber"
    );

    loop {
        match event_loop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(_))) => {
                info!(topic = %config.topic, "connected to broker, subscribing");
                client.subscribe(&config.topic, QoS::AtMostOnce).await?;
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                handle_payload(repo.as_ref(), &publish.payload).await;
            }
            Ok(_) => {}
            Err(e) => {
                warn!(error = %e, "broker connection error, retrying");
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::MeasurementRepository;

    #[tokio::test]
    async fn test_valid_payload_is_stored() {
        let repo = LocalRepository::new();
        let payload =
            br#"{"tray_number":4,"length":16.2,"width":3.4,"area":52.1,"weight":123.0,"count":310}"#;

        let outcome = handle_payload(&repo, payload).await;
        assert!(matches!(outcome, PayloadOutcome::Stored(_)));
        assert_eq!(repo.count_measurements().await.unwrap(), 1);

        let records = repo.records_for_tray(TrayId::new(4)).await.unwrap();
        assert_eq!(records[0].weight, 123.0);
    }

    #[tokio::test]
    async fn test_payload_missing_count_is_dropped_silently() {
        let repo = LocalRepository::new();
        let payload = br#"{"tray_number":4,"length":16.2,"width":3.4,"area":52.1,"weight":123.0}"#;

        let outcome = handle_payload(&repo, payload).await;
        assert_eq!(outcome, PayloadOutcome::Dropped);
        assert_eq!(repo.count_measurements().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_non_json_payload_is_dropped() {
        let repo = LocalRepository::new();
        let outcome = handle_payload(&repo, b"not json at all").await;
        assert_eq!(outcome, PayloadOutcome::Dropped);
        assert_eq!(repo.count_measurements().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_is_swallowed() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);
        let payload =
            br#"{"tray_number":4,"length":16.2,"width":3.4,"area":52.1,"weight":123.0,"count":310}"#;

        let outcome = handle_payload(&repo, payload).await;
        assert_eq!(outcome, PayloadOutcome::Dropped);
    }
}
