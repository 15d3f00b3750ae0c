//! Measurement repository trait: append-only storage and ordered queries.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::api::TrayId;
use crate::db::models::{MeasurementRecord, NewMeasurement};

/// Repository trait for the append-only measurement table.
///
/// Query methods return records ordered ascending by `captured_at`; the
/// aggregation engine relies on this ordering (its day-bucketing reducer
/// requires a sorted input).
///
/// # Thread Safety
/// Implementations must be `Send + Sync` to work with async Rust.
#[async_trait]
pub trait MeasurementRepository: Send + Sync {
    /// Check if the storage connection is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the connection is healthy
    /// - `Ok(false)` if unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Append a new measurement record.
    ///
    /// The write is atomic: on failure nothing is stored and the error is
    /// recoverable (the caller may retry or surface it).
    ///
    /// # Returns
    /// * `Ok(MeasurementRecord)` - The stored record with its assigned id
    ///   and resolved capture timestamp
    async fn insert_measurement(
        &self,
        measurement: &NewMeasurement,
    ) -> RepositoryResult<MeasurementRecord>;

    /// All records for one tray, ascending by `captured_at`.
    ///
    /// An unknown tray id yields an empty vector, not an error.
    async fn records_for_tray(&self, tray: TrayId) -> RepositoryResult<Vec<MeasurementRecord>>;

    /// All records across every tray, ascending by `captured_at`.
    async fn all_records(&self) -> RepositoryResult<Vec<MeasurementRecord>>;

    /// The most recent record for a tray (max `captured_at`), if any.
    async fn latest_for_tray(&self, tray: TrayId)
        -> RepositoryResult<Option<MeasurementRecord>>;

    /// Distinct tray ids present in storage, sorted ascending.
    ///
    /// Trays are discovered dynamically from stored records; the set is
    /// never declared or hardcoded.
    async fn list_tray_ids(&self) -> RepositoryResult<Vec<TrayId>>;

    /// Total number of stored measurement records.
    async fn count_measurements(&self) -> RepositoryResult<usize>;
}
