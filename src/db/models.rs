//! Persistent data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::TrayId;

/// One stored observation of a tray.
///
/// Records are immutable once stored; `captured_at` determines ordering.
/// Multiple records may share the same tray id and there is no uniqueness
/// constraint across any field combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Storage-assigned primary key.
    pub id: i64,
    pub tray: TrayId,
    pub length: f64,
    pub width: f64,
    pub area: f64,
    pub weight: f64,
    /// Number of organisms observed. Non-negative.
    pub count: i64,
    pub captured_at: DateTime<Utc>,
}

/// A measurement about to be stored (no id yet).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMeasurement {
    pub tray: TrayId,
    pub length: f64,
    pub width: f64,
    pub area: f64,
    pub weight: f64,
    pub count: i64,
    /// Capture time; defaults to ingestion time when the client omits it.
    pub captured_at: Option<DateTime<Utc>>,
}

impl NewMeasurement {
    /// Resolve the capture timestamp, defaulting to now.
    pub fn captured_at_or_now(&self) -> DateTime<Utc> {
        self.captured_at.unwrap_or_else(Utc::now)
    }
}

/// A dashboard user account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    /// Salted hash in `salt$digest` form; see [`crate::db::password`].
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
