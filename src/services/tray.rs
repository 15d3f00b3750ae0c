//! Single-tray dashboard view assembly.

use chrono::Utc;

use super::distributions::weight_histogram;
use super::growth::{daily_series, DailyReduction};
use super::{round1, round_series};
use crate::api::{TrayDashboardData, TrayMetrics};
use crate::db::models::MeasurementRecord;

/// Build the dashboard payload for one tray from its full history.
///
/// Precondition: `records` sorted ascending by `captured_at`. The caller
/// decides what an empty history means (the HTTP layer answers 404 before
/// calling this); given no records the result is zero-shaped.
pub fn tray_dashboard(records: &[MeasurementRecord]) -> TrayDashboardData {
    let growth_data = round_series(daily_series(records, DailyReduction::LastWins));

    let weights: Vec<f64> = records.iter().map(|r| r.weight).collect();
    let weight_distribution = weight_histogram(&weights);

    let (metrics, timestamp) = match records.last() {
        Some(latest) => (
            TrayMetrics {
                length: round1(latest.length),
                width: round1(latest.width),
                area: round1(latest.area),
                weight: round1(latest.weight),
                count: latest.count,
            },
            latest.captured_at.to_rfc3339(),
        ),
        None => (TrayMetrics::zeros(), Utc::now().to_rfc3339()),
    };

    TrayDashboardData {
        metrics,
        growth_data,
        weight_distribution,
        timestamp,
    }
}
