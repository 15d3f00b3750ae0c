//! Combined all-trays dashboard view assembly.

use chrono::Utc;

use super::distributions::weight_histogram;
use super::growth::{daily_series, DailyReduction};
use super::{round1, round_series};
use crate::api::{TrayDashboardData, TrayMetrics};
use crate::db::models::MeasurementRecord;

/// Build the combined view across all trays.
///
/// `per_tray_latest` holds one record per tray (that tray's max
/// `captured_at`); `all_records` is every stored record, sorted ascending
/// by `captured_at`.
///
/// Metrics average the latest-per-tray length/width/area/weight (rounded
/// to one decimal) and sum the counts. The growth series buckets **all**
/// records by day index relative to the earliest timestamp across all
/// trays and averages each day — a per-day mean, unlike the last-wins
/// policy of the per-tray views.
///
/// Empty input yields all-zero metrics, not an error.
pub fn combined_dashboard(
    per_tray_latest: &[MeasurementRecord],
    all_records: &[MeasurementRecord],
) -> TrayDashboardData {
    let metrics = if per_tray_latest.is_empty() {
        TrayMetrics::zeros()
    } else {
        let n = per_tray_latest.len() as f64;
        TrayMetrics {
            length: round1(per_tray_latest.iter().map(|r| r.length).sum::<f64>() / n),
            width: round1(per_tray_latest.iter().map(|r| r.width).sum::<f64>() / n),
            area: round1(per_tray_latest.iter().map(|r| r.area).sum::<f64>() / n),
            weight: round1(per_tray_latest.iter().map(|r| r.weight).sum::<f64>() / n),
            count: per_tray_latest.iter().map(|r| r.count).sum(),
        }
    };

    let growth_data = round_series(daily_series(all_records, DailyReduction::MeanPerDay));

    let weights: Vec<f64> = all_records.iter().map(|r| r.weight).collect();
    let weight_distribution = weight_histogram(&weights);

    TrayDashboardData {
        metrics,
        growth_data,
        weight_distribution,
        timestamp: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::TrayId;
    use chrono::{Duration, TimeZone, Utc};

    fn record(tray: i64, day: i64, weight: f64, count: i64) -> MeasurementRecord {
        MeasurementRecord {
            id: 0,
            tray: TrayId::new(tray),
            length: 10.0 + tray as f64,
            width: 3.0,
            area: 40.0,
            weight,
            count,
            captured_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
                + Duration::days(day),
        }
    }

    #[test]
    fn test_metrics_average_latest_per_tray() {
        // Tray A latest weight 100, tray B latest weight 120 -> 110.0.
        let latest = vec![record(1, 3, 100.0, 200), record(2, 3, 120.0, 300)];
        let all = latest.clone();
        let view = combined_dashboard(&latest, &all);
        assert_eq!(view.metrics.weight, 110.0);
        assert_eq!(view.metrics.count, 500);
    }

    #[test]
    fn test_growth_series_is_per_day_mean_over_all_trays() {
        let all = vec![
            record(1, 0, 100.0, 100),
            record(2, 0, 120.0, 100),
            record(1, 1, 110.0, 100),
        ];
        let latest = vec![record(1, 1, 110.0, 100), record(2, 0, 120.0, 100)];
        let view = combined_dashboard(&latest, &all);
        assert_eq!(view.growth_data.days, vec![1, 2]);
        assert_eq!(view.growth_data.weight, vec![110.0, 110.0]);
    }

    #[test]
    fn test_empty_input_defaults_to_zeros() {
        let view = combined_dashboard(&[], &[]);
        assert_eq!(view.metrics, TrayMetrics::zeros());
        assert!(view.growth_data.is_empty());
        assert_eq!(view.weight_distribution.counts, vec![0; 7]);
    }

    #[test]
    fn test_histogram_spans_all_records_of_all_trays() {
        let all = vec![
            record(1, 0, 85.0, 100),
            record(2, 0, 95.0, 100),
            record(3, 1, 145.0, 100),
        ];
        let latest = all.clone();
        let view = combined_dashboard(&latest, &all);
        assert_eq!(view.weight_distribution.counts.iter().sum::<usize>(), 3);
    }
}
