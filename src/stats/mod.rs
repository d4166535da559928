//! Distribution statistics for single numeric features.
//!
//! Quantile binning, histogram proportions, and interpolated
//! percentiles. These are the leaves everything else builds on: the
//! drift analyzer bins baseline and current samples against the same
//! baseline-derived edges, and the score analyzer summarizes a
//! prediction sample with percentiles.

mod distribution;
mod percentile;

pub use distribution::{bin_counts, bin_proportions, quantile_edges, FeatureDistribution};
pub use percentile::{percentile, sorted_copy};
