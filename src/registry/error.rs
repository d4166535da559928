//! Registry and promotion error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from registry operations. Every failure leaves previously
/// published state (alias and ledger) intact.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Candidate artifact file does not exist.
    #[error("Model artifact missing: {path}")]
    ArtifactMissing { path: PathBuf },

    /// Metrics blob lacks a numeric value for the primary metric.
    #[error("Candidate metrics have no numeric '{metric}' value")]
    InvalidMetrics { metric: String },

    /// Another commit or rollback holds the registry lock.
    #[error("Registry lock is held by another process: {path}")]
    LockHeld { path: PathBuf },

    /// Ledger file exists but cannot be trusted.
    #[error("Corrupt registry ledger: {message}")]
    CorruptLedger { message: String },

    /// Rollback requested but the ledger records no previous champion.
    #[error("Nothing to roll back to: the ledger has no previous champion")]
    NothingToRollBack,

    /// IO error with context.
    #[error("Registry IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl RegistryError {
    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }
}

/// Errors from the promotion decision. The engine never mutates the
/// registry on any of these.
#[derive(Debug, Error)]
pub enum PromotionError {
    /// No candidate family produced a metrics file.
    #[error("No candidate metrics found under {metrics_dir}")]
    NoCandidates { metrics_dir: PathBuf },

    /// A metrics file (or the metrics directory) could not be read or parsed.
    #[error("Unreadable candidate metrics {path}: {message}")]
    UnreadableMetrics { path: PathBuf, message: String },

    /// A metrics file parsed but has no numeric primary metric.
    #[error("Metrics file {path} has no numeric '{metric}' value")]
    MissingPrimaryMetric { path: PathBuf, metric: String },

    /// A metrics file names no artifact to promote.
    #[error("Metrics file {path} is missing the 'artifact' field")]
    MissingArtifactField { path: PathBuf },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_error_messages_name_the_problem() {
        let err = RegistryError::ArtifactMissing { path: "/models/m.bin".into() };
        assert!(err.to_string().contains("m.bin"));

        let err = RegistryError::InvalidMetrics { metric: "pr_auc".into() };
        assert!(err.to_string().contains("pr_auc"));
    }

    #[test]
    fn test_promotion_error_mentions_path() {
        let err = PromotionError::MissingPrimaryMetric {
            path: "/metrics/candidate_hgb_x.json".into(),
            metric: "pr_auc".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("candidate_hgb_x.json"));
        assert!(msg.contains("pr_auc"));
    }
}
