//! Validated settings structs injected into each component.

use std::path::PathBuf;

use crate::error::{Result, VigilarError};

/// Knobs for the PSI drift comparison. One instance applies to every
/// feature in a run; there is no per-feature override.
#[derive(Debug, Clone)]
pub struct DriftSettings {
    /// Number of baseline-quantile buckets.
    pub bucket_count: usize,
    /// WARN at `max_psi >=` this value (inclusive).
    pub warn_threshold: f64,
    /// FAIL at `max_psi >=` this value (inclusive).
    pub fail_threshold: f64,
    /// Floor substituted for zero bucket proportions.
    pub epsilon: f64,
}

impl Default for DriftSettings {
    fn default() -> Self {
        Self { bucket_count: 10, warn_threshold: 0.1, fail_threshold: 0.25, epsilon: 1e-6 }
    }
}

impl DriftSettings {
    /// Check value ranges before a run starts.
    pub fn validate(&self) -> Result<()> {
        if self.bucket_count < 2 {
            return Err(VigilarError::Config {
                field: "buckets".into(),
                message: format!("must be at least 2, got {}", self.bucket_count),
            });
        }
        if !(self.warn_threshold > 0.0 && self.warn_threshold.is_finite()) {
            return Err(VigilarError::Config {
                field: "warn".into(),
                message: format!("must be a positive number, got {}", self.warn_threshold),
            });
        }
        if self.fail_threshold < self.warn_threshold || !self.fail_threshold.is_finite() {
            return Err(VigilarError::Config {
                field: "fail".into(),
                message: format!(
                    "must be >= the warn threshold {}, got {}",
                    self.warn_threshold, self.fail_threshold
                ),
            });
        }
        if !(self.epsilon > 0.0 && self.epsilon.is_finite()) {
            return Err(VigilarError::Config {
                field: "epsilon".into(),
                message: format!("must be a positive number, got {}", self.epsilon),
            });
        }
        Ok(())
    }
}

/// Knobs for the score-health summary.
#[derive(Debug, Clone)]
pub struct ScoreSettings {
    /// Name of the prediction-score column.
    pub column: String,
    /// Scores at or above this value count as high risk.
    pub high_risk_threshold: f64,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self { column: "score".into(), high_risk_threshold: 0.7 }
    }
}

impl ScoreSettings {
    pub fn validate(&self) -> Result<()> {
        if !self.high_risk_threshold.is_finite() {
            return Err(VigilarError::Config {
                field: "threshold".into(),
                message: format!("must be a finite number, got {}", self.high_risk_threshold),
            });
        }
        Ok(())
    }
}

/// Where the registry lives and which metric decides promotion.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    /// Directory holding the ledger, lock, and stored artifact copies.
    pub registry_dir: PathBuf,
    /// Serving alias the scoring job reads.
    pub alias_path: PathBuf,
    /// Higher-is-better metric used for selection and recorded in the
    /// ledger.
    pub primary_metric: String,
}

/// Inputs to a promotion decision.
#[derive(Debug, Clone)]
pub struct PromotionSettings {
    /// Directory holding trained artifact files.
    pub models_dir: PathBuf,
    /// Directory holding `<family>_<stamp>.json` metrics blobs.
    pub metrics_dir: PathBuf,
    /// Model families competing for champion.
    pub families: Vec<String>,
    pub registry: RegistrySettings,
}
