//! Quantile binning against baseline-derived edges.

use crate::stats::percentile::sorted_copy;

/// Bucket edges at baseline quantiles.
///
/// Produces `bucket_count + 1` edges. The outer edges are unbounded so
/// every current value falls in some bucket even when it lies outside
/// the baseline's observed range. Interior edges repeat when the
/// baseline has low (or zero) variance; the resulting empty buckets
/// are handled downstream by the epsilon floor.
pub fn quantile_edges(sorted_baseline: &[f64], bucket_count: usize) -> Vec<f64> {
    debug_assert!(!sorted_baseline.is_empty());
    debug_assert!(bucket_count >= 2);

    let mut edges = Vec::with_capacity(bucket_count + 1);
    edges.push(f64::NEG_INFINITY);
    for i in 1..bucket_count {
        let idx = (sorted_baseline.len() * i / bucket_count).min(sorted_baseline.len() - 1);
        edges.push(sorted_baseline[idx]);
    }
    edges.push(f64::INFINITY);
    edges
}

/// Count samples per bucket. A value lands in the first bucket whose
/// half-open interval `(lo, hi]` contains it.
pub fn bin_counts(data: &[f64], edges: &[f64]) -> Vec<usize> {
    let mut counts = vec![0; edges.len() - 1];
    for &val in data {
        for i in 0..counts.len() {
            if val > edges[i] && val <= edges[i + 1] {
                counts[i] += 1;
                break;
            }
        }
    }
    counts
}

/// Per-bucket proportions of a nonempty sample. Sums to 1 up to
/// floating-point tolerance.
pub fn bin_proportions(data: &[f64], edges: &[f64]) -> Vec<f64> {
    debug_assert!(!data.is_empty());
    let total = data.len() as f64;
    bin_counts(data, edges).into_iter().map(|c| c as f64 / total).collect()
}

/// A single feature's baseline binning: edges derived from baseline
/// quantiles plus the baseline's own bucket proportions.
///
/// Built once per (feature, baseline) pair and never mutated; current
/// samples are binned against the same fixed edges so the comparison
/// stays baseline-referential.
#[derive(Debug, Clone)]
pub struct FeatureDistribution {
    name: String,
    edges: Vec<f64>,
    proportions: Vec<f64>,
}

impl FeatureDistribution {
    /// Build from a baseline sample (need not be sorted).
    pub fn from_baseline(name: &str, baseline: &[f64], bucket_count: usize) -> Self {
        let sorted = sorted_copy(baseline);
        let edges = quantile_edges(&sorted, bucket_count);
        let proportions = bin_proportions(&sorted, &edges);
        Self { name: name.to_string(), edges, proportions }
    }

    /// Feature name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bucket edges, `bucket_count + 1` long.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Baseline per-bucket proportions.
    pub fn proportions(&self) -> &[f64] {
        &self.proportions
    }

    /// Bin a current sample against this baseline's edges.
    pub fn proportions_of(&self, current: &[f64]) -> Vec<f64> {
        bin_proportions(current, &self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_edges_are_unbounded_at_ends() {
        let sorted: Vec<f64> = (0..100).map(f64::from).collect();
        let edges = quantile_edges(&sorted, 10);
        assert_eq!(edges.len(), 11);
        assert_eq!(edges[0], f64::NEG_INFINITY);
        assert_eq!(edges[10], f64::INFINITY);
    }

    #[test]
    fn test_edges_are_nondecreasing() {
        let sorted: Vec<f64> = (0..57).map(f64::from).collect();
        let edges = quantile_edges(&sorted, 10);
        for pair in edges.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
    }

    #[test]
    fn test_bin_counts() {
        let data = vec![0.5, 1.5, 2.5, 3.5];
        let edges = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(bin_counts(&data, &edges), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_bin_counts_boundary_goes_low() {
        // A value exactly on an interior edge belongs to the lower bucket.
        let edges = vec![f64::NEG_INFINITY, 1.0, f64::INFINITY];
        assert_eq!(bin_counts(&[1.0], &edges), vec![1, 0]);
        assert_eq!(bin_counts(&[1.0001], &edges), vec![0, 1]);
    }

    #[test]
    fn test_proportions_sum_to_one() {
        let data: Vec<f64> = (0..100).map(f64::from).collect();
        let edges = quantile_edges(&sorted_copy(&data), 10);
        let props = bin_proportions(&data, &edges);
        assert_relative_eq!(props.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_constant_baseline_collapses_to_one_bucket() {
        let data = vec![5.0; 40];
        let dist = FeatureDistribution::from_baseline("flat", &data, 10);
        assert_relative_eq!(dist.proportions()[0], 1.0);
        assert!(dist.proportions()[1..].iter().all(|&p| p == 0.0));
    }

    #[test]
    fn test_current_binned_against_baseline_edges() {
        let baseline: Vec<f64> = (0..100).map(f64::from).collect();
        let dist = FeatureDistribution::from_baseline("f", &baseline, 10);
        // Everything far above the baseline range lands in the last bucket.
        let props = dist.proportions_of(&[1e6, 2e6, 3e6]);
        assert_relative_eq!(props[props.len() - 1], 1.0);
    }

    #[test]
    fn test_small_sample_with_many_buckets() {
        let data = vec![1.0, 2.0, 3.0];
        let dist = FeatureDistribution::from_baseline("small", &data, 10);
        assert_eq!(dist.edges().len(), 11);
        let sum: f64 = dist.proportions().iter().sum();
        assert_relative_eq!(sum, 1.0, epsilon = 1e-9);
    }
}
