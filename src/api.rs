//! Public API surface for the backend.
//!
//! This file consolidates the DTO types shared by the aggregation engine
//! and the HTTP API. All types derive Serialize/Deserialize for JSON
//! serialization; field renames match the wire format the dashboard
//! frontend consumes (`growthData`, `weightDistribution`, `allWeights`).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Tray identifier (physical tray slot number).
///
/// Tray ids are discovered dynamically from stored measurements; the set
/// of trays is not fixed or bounded.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TrayId(pub i64);

impl TrayId {
    pub fn new(value: i64) -> Self {
        TrayId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for TrayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<TrayId> for i64 {
    fn from(id: TrayId) -> Self {
        id.0
    }
}

/// Latest physical metrics for a tray (or an average across trays).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrayMetrics {
    pub length: f64,
    pub width: f64,
    pub area: f64,
    pub weight: f64,
    pub count: i64,
}

impl TrayMetrics {
    /// All-zero metrics, used as the placeholder for trays without records.
    pub fn zeros() -> Self {
        Self {
            length: 0.0,
            width: 0.0,
            area: 0.0,
            weight: 0.0,
            count: 0,
        }
    }
}

/// One-entry-per-day growth series.
///
/// `days` holds 1-based day indices relative to the earliest record in the
/// source set; `length` and `weight` are parallel arrays. Day indices are
/// strictly increasing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrowthSeries {
    pub days: Vec<i64>,
    pub length: Vec<f64>,
    pub weight: Vec<f64>,
}

impl GrowthSeries {
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Weight-distribution histogram over seven fixed buckets.
///
/// `ranges` and `counts` are parallel arrays in fixed bucket order
/// (`80-90` .. `130-140`, `140+`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightDistribution {
    pub ranges: Vec<String>,
    pub counts: Vec<usize>,
}

/// Dashboard payload for a single tray or the combined all-trays view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayDashboardData {
    pub metrics: TrayMetrics,
    #[serde(rename = "growthData")]
    pub growth_data: GrowthSeries,
    #[serde(rename = "weightDistribution")]
    pub weight_distribution: WeightDistribution,
    /// RFC 3339 timestamp: the latest record for per-tray views, the
    /// computation time for the combined view.
    pub timestamp: String,
}

/// Per-tray entry in the comparison view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrayComparisonEntry {
    pub latest: TrayMetrics,
    #[serde(rename = "growthData")]
    pub growth_data: GrowthSeries,
    /// Raw, unrounded weight values in original order, for client-side
    /// histogram rendering.
    #[serde(rename = "allWeights")]
    pub all_weights: Vec<f64>,
}

/// Cross-tray comparison payload: one entry per known tray id.
///
/// Trays with zero records appear with zero-valued placeholders rather
/// than being omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonData {
    pub trays: BTreeMap<TrayId, TrayComparisonEntry>,
    pub timestamp: String,
}
