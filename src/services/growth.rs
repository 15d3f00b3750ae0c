//! Day-bucketing reducer: raw measurement streams to growth series.
//!
//! Every growth view in the dashboard reduces a time-ordered record
//! sequence to one entry per day index. Two reduction policies exist and
//! both are implemented here, parameterized by [`DailyReduction`], rather
//! than duplicated per endpoint:
//!
//! - per-tray views keep the **last** record seen for a day;
//! - the combined view takes the **mean** of every record on a day.

use std::collections::BTreeMap;

use crate::api::GrowthSeries;
use crate::db::models::MeasurementRecord;

/// Policy applied when multiple records map to the same day index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyReduction {
    /// The chronologically latest record determines the day's value.
    LastWins,
    /// The day's value is the arithmetic mean of all its records.
    MeanPerDay,
}

/// Reduce a record sequence to a one-entry-per-day growth series.
///
/// Precondition: `records` is sorted ascending by `captured_at` (the
/// repository guarantees this for its query results). The day index of a
/// record is `(date(record) - date(records[0])).days + 1`, 1-based.
///
/// With [`DailyReduction::LastWins`], a record whose day index was already
/// seen overwrites that day's slot in place — including an out-of-order or
/// same-day repeat with a smaller-than-maximum day index, which updates
/// the existing slot rather than being dropped or reordered. Output arrays
/// are emitted in ascending day-index order and day indices are strictly
/// increasing.
///
/// Values are emitted unrounded; callers round where the view requires it.
/// Empty input yields empty arrays — signaling "no data" upstream is the
/// caller's concern.
pub fn daily_series(records: &[MeasurementRecord], reduction: DailyReduction) -> GrowthSeries {
    let base_date = match records.first() {
        Some(first) => first.captured_at.date_naive(),
        None => return GrowthSeries::default(),
    };

    let mut series = GrowthSeries::default();
    match reduction {
        DailyReduction::LastWins => {
            let mut per_day: BTreeMap<i64, (f64, f64)> = BTreeMap::new();
            for record in records {
                let day = (record.captured_at.date_naive() - base_date).num_days() + 1;
                per_day.insert(day, (record.length, record.weight));
            }
            for (day, (length, weight)) in per_day {
                series.days.push(day);
                series.length.push(length);
                series.weight.push(weight);
            }
        }
        DailyReduction::MeanPerDay => {
            let mut per_day: BTreeMap<i64, (f64, f64, usize)> = BTreeMap::new();
            for record in records {
                let day = (record.captured_at.date_naive() - base_date).num_days() + 1;
                let slot = per_day.entry(day).or_insert((0.0, 0.0, 0));
                slot.0 += record.length;
                slot.1 += record.weight;
                slot.2 += 1;
            }
            for (day, (length_sum, weight_sum, n)) in per_day {
                series.days.push(day);
                series.length.push(length_sum / n as f64);
                series.weight.push(weight_sum / n as f64);
            }
        }
    }
    series
}
