//! Drift detection against a training baseline.
//!
//! Compares the distribution of each monitored feature in a current
//! extract against the same feature in the training baseline using the
//! Population Stability Index, and aggregates the per-feature values
//! into a PASS/WARN/FAIL verdict.

mod psi;
mod report;

pub use psi::{psi_value, PsiDriftAnalyzer};
pub use report::{
    BucketDetail, DriftReport, DriftStatus, FeatureReport, SkipReason, Thresholds,
};
