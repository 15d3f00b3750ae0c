//! Weight-distribution histogram over fixed buckets.

use crate::api::WeightDistribution;

/// Fixed bucket labels, in output order.
pub const WEIGHT_BUCKET_LABELS: [&str; 7] = [
    "80-90", "90-100", "100-110", "110-120", "120-130", "130-140", "140+",
];

/// Count weights into the seven fixed half-open buckets.
///
/// Buckets are evaluated in the fixed chain order: a weight of exactly 90
/// lands in `90-100`, not `80-90`. Weights below 80 fall through to the
/// final `140+` counter together with weights of 140 and above; the
/// dashboard frontend relies on this exact bucketing.
///
/// The result depends only on the multiset of weights, not their order,
/// and every input falls into exactly one bucket.
pub fn weight_histogram(weights: &[f64]) -> WeightDistribution {
    let mut counts = [0usize; 7];
    for &weight in weights {
        let bucket = if (80.0..90.0).contains(&weight) {
            0
        } else if (90.0..100.0).contains(&weight) {
            1
        } else if (100.0..110.0).contains(&weight) {
            2
        } else if (110.0..120.0).contains(&weight) {
            3
        } else if (120.0..130.0).contains(&weight) {
            4
        } else if (130.0..140.0).contains(&weight) {
            5
        } else {
            6
        };
        counts[bucket] += 1;
    }

    WeightDistribution {
        ranges: WEIGHT_BUCKET_LABELS.iter().map(|s| s.to_string()).collect(),
        counts: counts.to_vec(),
    }
}
