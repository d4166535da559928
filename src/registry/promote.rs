//! Promotion decision engine.
//!
//! Each retrain cycle leaves one metrics file per model family in the
//! metrics directory, named `<family>_<stamp>.json` with the stamp
//! sortable as text. The engine reads the newest file per family,
//! compares the primary metric across families, and hands the winner
//! to the registry. Selection is pure; the registry does all
//! mutation.

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PromotionSettings;
use crate::error::Result;
use crate::registry::error::PromotionError;
use crate::registry::ledger::LedgerEvent;
use crate::registry::metrics::MetricsDocument;
use crate::registry::store::ModelRegistry;

/// One candidate in the promotion contest.
#[derive(Debug, Clone)]
pub struct CandidateRecord {
    pub family: String,
    pub metrics_path: PathBuf,
    pub artifact_path: PathBuf,
    pub metrics: MetricsDocument,
    pub primary_value: f64,
    /// Timestamp portion of the metrics filename, used as the
    /// tie-break.
    pub stamp: String,
}

/// Selects the winning candidate and delegates the switch.
pub struct PromotionDecisionEngine {
    settings: PromotionSettings,
}

impl PromotionDecisionEngine {
    pub fn new(settings: PromotionSettings) -> Self {
        Self { settings }
    }

    /// Collect the newest candidate per family.
    ///
    /// A family with no metrics file is skipped; a metrics file that
    /// exists but cannot be read, parsed, or scored aborts the whole
    /// decision. Zero surviving candidates is an error: promotion
    /// never silently no-ops.
    pub fn gather_candidates(&self) -> std::result::Result<Vec<CandidateRecord>, PromotionError> {
        let metric_name = &self.settings.registry.primary_metric;
        let mut candidates = Vec::new();

        for family in &self.settings.families {
            let Some((path, stamp)) = latest_metrics_file(&self.settings.metrics_dir, family)?
            else {
                continue;
            };

            let text = fs::read_to_string(&path).map_err(|e| {
                PromotionError::UnreadableMetrics { path: path.clone(), message: e.to_string() }
            })?;
            let value: serde_json::Value = serde_json::from_str(&text).map_err(|e| {
                PromotionError::UnreadableMetrics { path: path.clone(), message: e.to_string() }
            })?;
            let metrics = MetricsDocument::new(value);

            let primary_value = metrics
                .metric(metric_name)
                .filter(|v| v.is_finite())
                .ok_or_else(|| PromotionError::MissingPrimaryMetric {
                    path: path.clone(),
                    metric: metric_name.clone(),
                })?;

            let artifact = metrics
                .artifact()
                .ok_or_else(|| PromotionError::MissingArtifactField { path: path.clone() })?;
            // Only the filename counts; metrics blobs sometimes carry
            // the training job's full path.
            let artifact_name = Path::new(artifact)
                .file_name()
                .ok_or_else(|| PromotionError::MissingArtifactField { path: path.clone() })?;
            let artifact_path = self.settings.models_dir.join(artifact_name);

            candidates.push(CandidateRecord {
                family: family.clone(),
                metrics_path: path,
                artifact_path,
                metrics,
                primary_value,
                stamp,
            });
        }

        if candidates.is_empty() {
            return Err(PromotionError::NoCandidates {
                metrics_dir: self.settings.metrics_dir.clone(),
            });
        }
        Ok(candidates)
    }

    /// Pick the winner: highest primary metric; ties go to the newer
    /// stamp, then to the lexicographically smallest family name.
    /// Deterministic regardless of input order.
    pub fn select(candidates: &[CandidateRecord]) -> &CandidateRecord {
        debug_assert!(!candidates.is_empty());
        candidates
            .iter()
            .max_by(|a, b| {
                a.primary_value
                    .partial_cmp(&b.primary_value)
                    .unwrap_or(Ordering::Equal)
                    .then_with(|| a.stamp.cmp(&b.stamp))
                    .then_with(|| b.family.cmp(&a.family))
            })
            .expect("candidates is nonempty")
    }

    /// Full decision: gather, select, commit. Nothing is mutated
    /// unless every step up to the registry commit succeeds.
    pub fn run(&self, registry: &ModelRegistry) -> Result<LedgerEvent> {
        let candidates = self.gather_candidates()?;
        let winner = Self::select(&candidates);
        let event = registry.commit(&winner.family, &winner.artifact_path, &winner.metrics)?;
        Ok(event)
    }
}

/// Newest `<family>_*.json` in the metrics directory, with its stamp.
/// Newest-first by filename; stamps sort correctly as text.
fn latest_metrics_file(
    metrics_dir: &Path,
    family: &str,
) -> std::result::Result<Option<(PathBuf, String)>, PromotionError> {
    if !metrics_dir.is_dir() {
        return Ok(None);
    }

    let prefix = format!("{family}_");
    let mut names: Vec<String> = fs::read_dir(metrics_dir)
        .map_err(|e| PromotionError::UnreadableMetrics {
            path: metrics_dir.to_path_buf(),
            message: e.to_string(),
        })?
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(&prefix) && name.ends_with(".json"))
        .collect();

    names.sort();
    Ok(names.pop().map(|name| {
        let stamp = name[prefix.len()..name.len() - ".json".len()].to_string();
        (metrics_dir.join(name), stamp)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn settings(dir: &Path, families: &[&str]) -> PromotionSettings {
        PromotionSettings {
            models_dir: dir.join("models"),
            metrics_dir: dir.join("metrics"),
            families: families.iter().map(|s| s.to_string()).collect(),
            registry: crate::config::RegistrySettings {
                registry_dir: dir.join("registry"),
                alias_path: dir.join("models").join("production_latest.bin"),
                primary_metric: "pr_auc".into(),
            },
        }
    }

    fn write_metrics(dir: &Path, name: &str, value: serde_json::Value) {
        fs::create_dir_all(dir.join("metrics")).unwrap();
        fs::write(dir.join("metrics").join(name), value.to_string()).unwrap();
    }

    fn write_model(dir: &Path, name: &str, content: &[u8]) {
        fs::create_dir_all(dir.join("models")).unwrap();
        fs::write(dir.join("models").join(name), content).unwrap();
    }

    #[test]
    fn test_latest_metrics_file_picks_newest_stamp() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(dir.path(), "candidate_hgb_20250101T000000Z.json", json!({}));
        write_metrics(dir.path(), "candidate_hgb_20250301T000000Z.json", json!({}));
        write_metrics(dir.path(), "candidate_hgb_20250201T000000Z.json", json!({}));

        let (path, stamp) =
            latest_metrics_file(&dir.path().join("metrics"), "candidate_hgb").unwrap().unwrap();
        assert!(path.to_string_lossy().contains("20250301"));
        assert_eq!(stamp, "20250301T000000Z");
    }

    #[test]
    fn test_latest_metrics_file_missing_dir_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let found = latest_metrics_file(&dir.path().join("nope"), "candidate_hgb").unwrap();
        assert!(found.is_none());
    }

    #[test]
    fn test_gather_skips_absent_family() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(
            dir.path(),
            "candidate_hgb_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.4}, "artifact": "hgb.bin"}),
        );

        let engine =
            PromotionDecisionEngine::new(settings(dir.path(), &["baseline_logreg", "candidate_hgb"]));
        let candidates = engine.gather_candidates().unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].family, "candidate_hgb");
    }

    #[test]
    fn test_gather_no_candidates_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let engine = PromotionDecisionEngine::new(settings(dir.path(), &["baseline_logreg"]));
        let err = engine.gather_candidates().unwrap_err();
        assert!(matches!(err, PromotionError::NoCandidates { .. }));
    }

    #[test]
    fn test_gather_unparseable_metrics_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("metrics")).unwrap();
        fs::write(
            dir.path().join("metrics").join("candidate_hgb_20250101T000000Z.json"),
            b"{broken",
        )
        .unwrap();

        let engine = PromotionDecisionEngine::new(settings(dir.path(), &["candidate_hgb"]));
        let err = engine.gather_candidates().unwrap_err();
        assert!(matches!(err, PromotionError::UnreadableMetrics { .. }));
    }

    #[test]
    fn test_gather_missing_primary_metric_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(
            dir.path(),
            "candidate_hgb_20250101T000000Z.json",
            json!({"metrics": {"accuracy": 0.9}, "artifact": "hgb.bin"}),
        );

        let engine = PromotionDecisionEngine::new(settings(dir.path(), &["candidate_hgb"]));
        let err = engine.gather_candidates().unwrap_err();
        assert!(matches!(err, PromotionError::MissingPrimaryMetric { .. }));
    }

    #[test]
    fn test_gather_missing_artifact_field_is_error() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(
            dir.path(),
            "candidate_hgb_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.4}}),
        );

        let engine = PromotionDecisionEngine::new(settings(dir.path(), &["candidate_hgb"]));
        let err = engine.gather_candidates().unwrap_err();
        assert!(matches!(err, PromotionError::MissingArtifactField { .. }));
    }

    #[test]
    fn test_select_highest_metric_wins() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(
            dir.path(),
            "baseline_logreg_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.31}, "artifact": "logreg.bin"}),
        );
        write_metrics(
            dir.path(),
            "candidate_hgb_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.44}, "artifact": "hgb.bin"}),
        );

        let engine =
            PromotionDecisionEngine::new(settings(dir.path(), &["baseline_logreg", "candidate_hgb"]));
        let candidates = engine.gather_candidates().unwrap();
        let winner = PromotionDecisionEngine::select(&candidates);
        assert_eq!(winner.family, "candidate_hgb");
    }

    #[test]
    fn test_select_tie_goes_to_newer_stamp() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(
            dir.path(),
            "baseline_logreg_20250301T000000Z.json",
            json!({"metrics": {"pr_auc": 0.4}, "artifact": "logreg.bin"}),
        );
        write_metrics(
            dir.path(),
            "candidate_hgb_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.4}, "artifact": "hgb.bin"}),
        );

        let engine =
            PromotionDecisionEngine::new(settings(dir.path(), &["baseline_logreg", "candidate_hgb"]));
        let candidates = engine.gather_candidates().unwrap();
        let winner = PromotionDecisionEngine::select(&candidates);
        assert_eq!(winner.family, "baseline_logreg");
    }

    #[test]
    fn test_select_full_tie_goes_to_smallest_family_name() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(
            dir.path(),
            "baseline_logreg_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.4}, "artifact": "logreg.bin"}),
        );
        write_metrics(
            dir.path(),
            "candidate_hgb_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.4}, "artifact": "hgb.bin"}),
        );

        // Same value, same stamp: order of the families list must not
        // matter.
        for families in [["baseline_logreg", "candidate_hgb"], ["candidate_hgb", "baseline_logreg"]]
        {
            let engine = PromotionDecisionEngine::new(settings(dir.path(), &families));
            let candidates = engine.gather_candidates().unwrap();
            let winner = PromotionDecisionEngine::select(&candidates);
            assert_eq!(winner.family, "baseline_logreg");
        }
    }

    #[test]
    fn test_run_commits_winner() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(
            dir.path(),
            "baseline_logreg_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.31}, "artifact": "logreg.bin"}),
        );
        write_metrics(
            dir.path(),
            "candidate_hgb_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.44}, "artifact": "hgb.bin"}),
        );
        write_model(dir.path(), "logreg.bin", b"logreg-bytes");
        write_model(dir.path(), "hgb.bin", b"hgb-bytes");

        let s = settings(dir.path(), &["baseline_logreg", "candidate_hgb"]);
        let registry = ModelRegistry::new(s.registry.clone());
        let engine = PromotionDecisionEngine::new(s);

        let event = engine.run(&registry).unwrap();
        assert!(event.artifact_id.starts_with("candidate_hgb_"));
        assert_eq!(
            fs::read(dir.path().join("models").join("production_latest.bin")).unwrap(),
            b"hgb-bytes"
        );
    }

    #[test]
    fn test_run_missing_artifact_leaves_registry_untouched() {
        let dir = tempfile::tempdir().unwrap();
        write_metrics(
            dir.path(),
            "candidate_hgb_20250101T000000Z.json",
            json!({"metrics": {"pr_auc": 0.44}, "artifact": "hgb.bin"}),
        );
        // No model file on disk.

        let s = settings(dir.path(), &["candidate_hgb"]);
        let registry = ModelRegistry::new(s.registry.clone());
        let engine = PromotionDecisionEngine::new(s);

        assert!(engine.run(&registry).is_err());
        assert!(registry.load_ledger().unwrap().events.is_empty());
    }
}
