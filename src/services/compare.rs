//! Cross-tray comparison view assembly.

use chrono::Utc;
use std::collections::BTreeMap;

use super::growth::{daily_series, DailyReduction};
use super::{round1, round_series};
use crate::api::{ComparisonData, TrayComparisonEntry, TrayId, TrayMetrics};
use crate::db::models::MeasurementRecord;

/// Build the side-by-side comparison view.
///
/// `records_by_tray` carries one entry per known tray id — ids are
/// discovered dynamically by the store's distinct scan, never hardcoded —
/// with each tray's full history sorted ascending by `captured_at`.
///
/// Trays with zero records produce an explicit zero-valued placeholder
/// (zero metrics, empty growth arrays, empty weight list) rather than
/// being omitted, so the frontend can still render them.
pub fn comparison(
    records_by_tray: &BTreeMap<TrayId, Vec<MeasurementRecord>>,
) -> ComparisonData {
    let mut trays = BTreeMap::new();

    for (&tray, records) in records_by_tray {
        let entry = match records.last() {
            Some(latest) => TrayComparisonEntry {
                latest: TrayMetrics {
                    length: round1(latest.length),
                    width: round1(latest.width),
                    area: round1(latest.area),
                    weight: round1(latest.weight),
                    count: latest.count,
                },
                growth_data: round_series(daily_series(records, DailyReduction::LastWins)),
                // Raw, unrounded weights in original order for client-side
                // histogram rendering.
                all_weights: records.iter().map(|r| r.weight).collect(),
            },
            None => TrayComparisonEntry {
                latest: TrayMetrics::zeros(),
                growth_data: Default::default(),
                all_weights: vec![],
            },
        };
        trays.insert(tray, entry);
    }

    ComparisonData {
        trays,
        timestamp: Utc::now().to_rfc3339(),
    }
}
