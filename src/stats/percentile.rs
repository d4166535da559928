//! Linear-interpolated percentiles over a sorted sample.

use std::cmp::Ordering;

/// Return a sorted copy of a sample.
///
/// NaN never occurs here in practice (input parsing drops non-finite
/// cells), but the comparator tolerates it rather than panicking.
pub fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    sorted
}

/// Percentile of a sorted, nonempty sample with linear interpolation.
///
/// `q` is a fraction in `[0, 1]`: `percentile(s, 0.5)` is the median.
/// The rank `q * (n - 1)` is split into its integer and fractional
/// parts and the two neighboring order statistics are blended.
pub fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));

    if sorted.len() == 1 {
        return sorted[0];
    }

    let rank = q * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;

    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_percentiles_are_ordered(
            values in prop::collection::vec(-1e6f64..1e6, 1..200)
        ) {
            let sorted = sorted_copy(&values);
            let p50 = percentile(&sorted, 0.50);
            let p90 = percentile(&sorted, 0.90);
            let p99 = percentile(&sorted, 0.99);
            prop_assert!(p50 <= p90);
            prop_assert!(p90 <= p99);
        }

        #[test]
        fn prop_percentile_within_sample_range(
            values in prop::collection::vec(-1e6f64..1e6, 1..200),
            q in 0.0f64..=1.0
        ) {
            let sorted = sorted_copy(&values);
            let p = percentile(&sorted, q);
            prop_assert!(p >= sorted[0]);
            prop_assert!(p <= sorted[sorted.len() - 1]);
        }
    }
}
