//! In-memory local repository implementation.
//!
//! This module provides a local implementation of all repository traits
//! suitable for unit testing, local development, and as the default
//! backend for this service. All data is stored in memory using Vec and
//! HashMap structures, providing fast, deterministic, isolated execution.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, RwLock};

use crate::api::TrayId;
use crate::db::models::{MeasurementRecord, NewMeasurement, User};
use crate::db::repository::{
    MeasurementRepository, RepositoryError, RepositoryResult, UserRepository,
};

/// In-memory local repository.
///
/// The measurement table is an append-only `Vec`; query methods return
/// sorted copies so callers always observe records in ascending
/// `captured_at` order regardless of insertion order. Ties on the capture
/// timestamp preserve insertion order (the sort is stable), matching the
/// append-only discipline of the store.
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    measurements: Vec<MeasurementRecord>,
    users: HashMap<String, User>,

    // ID counters
    next_measurement_id: i64,
    next_user_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            measurements: Vec::new(),
            users: HashMap::new(),
            next_measurement_id: 1,
            next_user_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Toggle simulated connection health (for failure-path tests).
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().unwrap().is_healthy = healthy;
    }

    fn guard_healthy(data: &LocalData) -> RepositoryResult<()> {
        if data.is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::ConnectionError(
                "local repository marked unhealthy".to_string(),
            ))
        }
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MeasurementRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        let data = self.data.read().unwrap();
        Ok(data.is_healthy)
    }

    async fn insert_measurement(
        &self,
        measurement: &NewMeasurement,
    ) -> RepositoryResult<MeasurementRecord> {
        let mut data = self.data.write().unwrap();
        Self::guard_healthy(&data)?;

        let id = data.next_measurement_id;
        data.next_measurement_id += 1;

        let record = MeasurementRecord {
            id,
            tray: measurement.tray,
            length: measurement.length,
            width: measurement.width,
            area: measurement.area,
            weight: measurement.weight,
            count: measurement.count,
            captured_at: measurement.captured_at_or_now(),
        };
        data.measurements.push(record.clone());
        Ok(record)
    }

    async fn records_for_tray(&self, tray: TrayId) -> RepositoryResult<Vec<MeasurementRecord>> {
        let data = self.data.read().unwrap();
        Self::guard_healthy(&data)?;

        let mut records: Vec<MeasurementRecord> = data
            .measurements
            .iter()
            .filter(|m| m.tray == tray)
            .cloned()
            .collect();
        records.sort_by_key(|m| m.captured_at);
        Ok(records)
    }

    async fn all_records(&self) -> RepositoryResult<Vec<MeasurementRecord>> {
        let data = self.data.read().unwrap();
        Self::guard_healthy(&data)?;

        let mut records = data.measurements.clone();
        records.sort_by_key(|m| m.captured_at);
        Ok(records)
    }

    async fn latest_for_tray(
        &self,
        tray: TrayId,
    ) -> RepositoryResult<Option<MeasurementRecord>> {
        // The tray's records are sorted ascending with stable tie-break,
        // so the last element is the latest observation.
        Ok(self.records_for_tray(tray).await?.into_iter().last())
    }

    async fn list_tray_ids(&self) -> RepositoryResult<Vec<TrayId>> {
        let data = self.data.read().unwrap();
        Self::guard_healthy(&data)?;

        let ids: BTreeSet<TrayId> = data.measurements.iter().map(|m| m.tray).collect();
        Ok(ids.into_iter().collect())
    }

    async fn count_measurements(&self) -> RepositoryResult<usize> {
        let data = self.data.read().unwrap();
        Self::guard_healthy(&data)?;
        Ok(data.measurements.len())
    }
}

#[async_trait]
impl UserRepository for LocalRepository {
    async fn create_user(&self, username: &str, password_hash: &str) -> RepositoryResult<User> {
        let mut data = self.data.write().unwrap();
        Self::guard_healthy(&data)?;

        if data.users.contains_key(username) {
            return Err(RepositoryError::ValidationError(format!(
                "username '{}' already exists",
                username
            )));
        }

        let id = data.next_user_id;
        data.next_user_id += 1;

        let user = User {
            id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        data.users.insert(username.to_string(), user.clone());
        Ok(user)
    }

    async fn find_user(&self, username: &str) -> RepositoryResult<Option<User>> {
        let data = self.data.read().unwrap();
        Self::guard_healthy(&data)?;
        Ok(data.users.get(username).cloned())
    }
}
