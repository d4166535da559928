//! Population Stability Index drift analysis.
//!
//! Baseline values are partitioned into quantile buckets; current
//! values are assigned to the same fixed edges, so the baseline sets
//! the reference frame and the current extract cannot move the
//! goalposts. Empty buckets take an epsilon floor instead of zero,
//! which keeps the logarithm defined and makes any movement away from
//! a constant baseline read as maximal drift.

use chrono::Utc;

use crate::config::DriftSettings;
use crate::drift::report::{
    BucketDetail, DriftReport, DriftStatus, FeatureReport, SkipReason, Thresholds,
};
use crate::error::{Result, VigilarError};
use crate::io::FeatureTable;
use crate::stats::FeatureDistribution;

/// PSI over two bucketed proportion vectors of equal length.
///
/// Zero proportions are floored at `epsilon` before the ratio is
/// taken. Every term `(c - b) * ln(c / b)` is nonnegative, so the sum
/// is too.
pub fn psi_value(baseline: &[f64], current: &[f64], epsilon: f64) -> f64 {
    debug_assert_eq!(baseline.len(), current.len());
    baseline
        .iter()
        .zip(current.iter())
        .map(|(&b, &c)| {
            let b = if b <= 0.0 { epsilon } else { b };
            let c = if c <= 0.0 { epsilon } else { c };
            (c - b) * (c / b).ln()
        })
        .sum()
}

/// Computes a per-feature PSI and an aggregate verdict for all
/// features shared between a baseline and a current extract.
pub struct PsiDriftAnalyzer {
    settings: DriftSettings,
}

impl PsiDriftAnalyzer {
    pub fn new(settings: DriftSettings) -> Self {
        Self { settings }
    }

    /// Compare `current` against `baseline` and produce a report.
    ///
    /// Features present in only one input are recorded as skipped, as
    /// are features whose column parses to an empty sample. The call
    /// fails only when not a single feature could be scored.
    pub fn analyze(&self, baseline: &FeatureTable, current: &FeatureTable) -> Result<DriftReport> {
        let thresholds =
            Thresholds { warn: self.settings.warn_threshold, fail: self.settings.fail_threshold };

        let mut per_feature = Vec::new();

        for name in baseline.column_names() {
            if !current.has_column(name) {
                per_feature.push(FeatureReport::skipped(name, SkipReason::MissingInCurrent));
                continue;
            }

            let base_col = baseline.column(name).unwrap_or(&[]);
            let cur_col = current.column(name).unwrap_or(&[]);

            if base_col.is_empty() {
                per_feature.push(FeatureReport::skipped(name, SkipReason::EmptyBaselineColumn));
                continue;
            }
            if cur_col.is_empty() {
                per_feature.push(FeatureReport::skipped(name, SkipReason::EmptyCurrentColumn));
                continue;
            }

            per_feature.push(self.score_feature(name, base_col, cur_col, &thresholds));
        }

        for name in current.column_names() {
            if !baseline.has_column(name) {
                per_feature.push(FeatureReport::skipped(name, SkipReason::MissingInBaseline));
            }
        }

        let max_psi = per_feature
            .iter()
            .filter_map(|f| f.psi)
            .fold(f64::NEG_INFINITY, f64::max);
        if max_psi == f64::NEG_INFINITY {
            return Err(VigilarError::input(
                "no feature could be scored: inputs share no nonempty numeric columns",
            ));
        }

        Ok(DriftReport {
            status: DriftStatus::classify(max_psi, &thresholds),
            max_psi,
            epsilon: self.settings.epsilon,
            bucket_count: self.settings.bucket_count,
            thresholds,
            per_feature,
            generated_at: Utc::now(),
        })
    }

    fn score_feature(
        &self,
        name: &str,
        baseline: &[f64],
        current: &[f64],
        thresholds: &Thresholds,
    ) -> FeatureReport {
        let dist = FeatureDistribution::from_baseline(name, baseline, self.settings.bucket_count);
        let current_props = dist.proportions_of(current);
        let psi = psi_value(dist.proportions(), &current_props, self.settings.epsilon);

        let buckets = dist
            .proportions()
            .iter()
            .zip(current_props.iter())
            .map(|(&baseline_pct, &current_pct)| BucketDetail { baseline_pct, current_pct })
            .collect();

        FeatureReport::scored(name, psi, DriftStatus::classify(psi, thresholds), buckets)
    }
}
