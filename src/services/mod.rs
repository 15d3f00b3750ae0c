//! Service layer: the aggregation engine.
//!
//! Pure functions turning ordered measurement streams into dashboard
//! views. No service holds state between calls; each invocation is a
//! function of its input records only, so recomputing any view from the
//! same stored record set yields identical output.

pub mod combined;
pub mod compare;
pub mod distributions;
pub mod growth;
pub mod tray;

pub use combined::combined_dashboard;
pub use compare::comparison;
pub use distributions::weight_histogram;
pub use growth::{daily_series, DailyReduction};
pub use tray::tray_dashboard;

use crate::api::GrowthSeries;

/// Round to one decimal place, the dashboard's display precision.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round a growth series' length/weight arrays to one decimal place.
pub(crate) fn round_series(mut series: GrowthSeries) -> GrowthSeries {
    for v in &mut series.length {
        *v = round1(*v);
    }
    for v in &mut series.weight {
        *v = round1(*v);
    }
    series
}
