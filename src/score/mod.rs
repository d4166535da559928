//! Score-health proxy over live prediction outputs.
//!
//! Summarizes a batch of predicted churn scores into percentiles and a
//! high-risk rate. There is no baseline here: this is a point-in-time
//! gauge of the serving model's output distribution, used as a cheap
//! substitute for ground-truth evaluation while labels lag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ScoreSettings;
use crate::error::{Result, VigilarError};
use crate::stats::{percentile, sorted_copy};

/// Distributional summary of one scoring batch.
///
/// Percentiles are linear-interpolated over the sorted sample, so
/// `p50 <= p90 <= p99` always holds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub mean: f64,
    pub p50: f64,
    pub p90: f64,
    pub p99: f64,
    pub high_risk_rate: f64,
    pub threshold: f64,
    pub sample_count: usize,
    pub generated_at: DateTime<Utc>,
}

/// Summarizes a prediction-score column.
pub struct ScoreHealthAnalyzer {
    settings: ScoreSettings,
}

impl ScoreHealthAnalyzer {
    pub fn new(settings: ScoreSettings) -> Self {
        Self { settings }
    }

    /// Summarize a score sample. Scores are expected to be
    /// probabilities in `[0, 1]` but out-of-range values are summarized
    /// as-is. An empty sample is an input error: there is nothing to
    /// summarize.
    pub fn analyze(&self, scores: &[f64]) -> Result<ScoreReport> {
        if scores.is_empty() {
            return Err(VigilarError::input("no scores to summarize"));
        }

        let sorted = sorted_copy(scores);
        let n = sorted.len();
        let threshold = self.settings.high_risk_threshold;
        let high_risk = sorted.iter().filter(|&&s| s >= threshold).count();

        Ok(ScoreReport {
            mean: sorted.iter().sum::<f64>() / n as f64,
            p50: percentile(&sorted, 0.50),
            p90: percentile(&sorted, 0.90),
            p99: percentile(&sorted, 0.99),
            high_risk_rate: high_risk as f64 / n as f64,
            threshold,
            sample_count: n,
            generated_at: Utc::now(),
        })
    }
}
