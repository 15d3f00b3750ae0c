//! Data Transfer Objects for the HTTP API.
//!
//! Request/response bodies for ingestion and authentication. The
//! dashboard view DTOs live in [`crate::api`] and are re-exported here.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    ComparisonData, GrowthSeries, TrayComparisonEntry, TrayDashboardData, TrayMetrics,
    WeightDistribution,
};

/// Ingestion payload: one measurement for one tray.
///
/// The same six required keys apply to the HTTP body and the MQTT payload;
/// a missing key fails deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestMeasurementRequest {
    pub tray_number: i64,
    pub length: f64,
    pub width: f64,
    pub area: f64,
    pub weight: f64,
    pub count: i64,
}

impl IngestMeasurementRequest {
    /// Validate payload invariants that the type system doesn't capture.
    pub fn validate(&self) -> Result<(), String> {
        if self.count < 0 {
            return Err(format!("count must be non-negative, got {}", self.count));
        }
        Ok(())
    }
}

/// Response for successful ingestion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResponse {
    pub status: String,
    /// Storage-assigned id of the new record
    pub id: i64,
}

/// Request body for account registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response for successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    /// Bearer token for the authenticated endpoints
    pub token: String,
    pub username: String,
}

/// Generic status response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

impl StatusResponse {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Storage connection status
    pub database: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_missing_key_fails_deserialization() {
        let json = r#"{"tray_number":1,"length":15.0,"width":3.0,"area":45.0,"weight":120.0}"#;
        let result: Result<IngestMeasurementRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_count_rejected_by_validate() {
        let payload = IngestMeasurementRequest {
            tray_number: 1,
            length: 15.0,
            width: 3.0,
            area: 45.0,
            weight: 120.0,
            count: -5,
        };
        assert!(payload.validate().is_err());
    }
}
