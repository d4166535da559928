//! Drift report data objects.
//!
//! Reports are built once by the analyzer, serialized to JSON for the
//! scheduler, and never mutated afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate drift verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DriftStatus {
    Pass,
    Warn,
    Fail,
}

impl DriftStatus {
    /// Classify a PSI value against thresholds. Boundaries are
    /// inclusive: a value exactly at a threshold takes the more severe
    /// status.
    pub fn classify(psi: f64, thresholds: &Thresholds) -> Self {
        if psi >= thresholds.fail {
            DriftStatus::Fail
        } else if psi >= thresholds.warn {
            DriftStatus::Warn
        } else {
            DriftStatus::Pass
        }
    }

    /// Get display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            DriftStatus::Pass => "PASS",
            DriftStatus::Warn => "WARN",
            DriftStatus::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for DriftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// WARN/FAIL thresholds applied to the maximum PSI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Thresholds {
    pub warn: f64,
    pub fail: f64,
}

/// Baseline vs current proportion for one bucket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BucketDetail {
    pub baseline_pct: f64,
    pub current_pct: f64,
}

/// Why a feature was excluded from scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Column present in current but absent from baseline.
    MissingInBaseline,
    /// Column present in baseline but absent from current.
    MissingInCurrent,
    /// Column exists in baseline but holds no numeric values.
    EmptyBaselineColumn,
    /// Column exists in current but holds no numeric values.
    EmptyCurrentColumn,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkipReason::MissingInBaseline => "column missing in baseline",
            SkipReason::MissingInCurrent => "column missing in current",
            SkipReason::EmptyBaselineColumn => "no numeric values in baseline column",
            SkipReason::EmptyCurrentColumn => "no numeric values in current column",
        };
        write!(f, "{s}")
    }
}

/// One entry per monitored feature: either a scored PSI or an explicit
/// skip. Exclusions are visible in the report, never silent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureReport {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DriftStatus>,
    pub skipped: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buckets: Vec<BucketDetail>,
}

impl FeatureReport {
    /// A feature that was scored.
    pub fn scored(name: &str, psi: f64, status: DriftStatus, buckets: Vec<BucketDetail>) -> Self {
        Self {
            name: name.to_string(),
            psi: Some(psi),
            status: Some(status),
            skipped: false,
            skip_reason: None,
            buckets,
        }
    }

    /// A feature that could not be scored.
    pub fn skipped(name: &str, reason: SkipReason) -> Self {
        Self {
            name: name.to_string(),
            psi: None,
            status: None,
            skipped: true,
            skip_reason: Some(reason),
            buckets: Vec::new(),
        }
    }
}

/// Full drift comparison result.
///
/// `status` is a pure function of `max_psi` and `thresholds`. The
/// `epsilon` substituted for empty buckets is recorded so a reported
/// PSI can be reproduced exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    pub status: DriftStatus,
    pub max_psi: f64,
    pub epsilon: f64,
    pub bucket_count: usize,
    pub thresholds: Thresholds,
    pub per_feature: Vec<FeatureReport>,
    pub generated_at: DateTime<Utc>,
}

impl DriftReport {
    /// Scored features only.
    pub fn scored(&self) -> impl Iterator<Item = &FeatureReport> {
        self.per_feature.iter().filter(|f| !f.skipped)
    }

    /// Features excluded from scoring.
    pub fn skipped(&self) -> impl Iterator<Item = &FeatureReport> {
        self.per_feature.iter().filter(|f| f.skipped)
    }
}
