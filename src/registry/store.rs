//! File-backed model registry.
//!
//! Promotion is a single exclusive-locked unit of work: copy the
//! artifact and metrics into immutable timestamp-keyed storage,
//! publish the serving alias by temp+rename, then append to the
//! ledger and move the champion pointer. All validation happens
//! before the first write, and the alias and ledger are only touched
//! by atomic renames, so a failed or killed commit leaves the
//! previously published state fully intact.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Utc;
use sha2::{Digest, Sha256};

use crate::config::RegistrySettings;
use crate::io::write_atomic;
use crate::registry::error::RegistryError;
use crate::registry::ledger::{EventKind, LedgerEvent, RegistryLedger};
use crate::registry::metrics::MetricsDocument;

const LEDGER_FILE: &str = "ledger.json";
const LOCK_FILE: &str = "registry.lock";

/// Durable store deciding which artifact serves.
pub struct ModelRegistry {
    settings: RegistrySettings,
}

impl ModelRegistry {
    pub fn new(settings: RegistrySettings) -> Self {
        Self { settings }
    }

    /// Path of the ledger document.
    pub fn ledger_path(&self) -> PathBuf {
        self.settings.registry_dir.join(LEDGER_FILE)
    }

    fn lock_path(&self) -> PathBuf {
        self.settings.registry_dir.join(LOCK_FILE)
    }

    /// Read-only view of the ledger, for history display. Takes no
    /// lock: the ledger file is only ever replaced atomically.
    pub fn load_ledger(&self) -> Result<RegistryLedger, RegistryError> {
        RegistryLedger::load(&self.ledger_path())
    }

    /// Promote a candidate artifact to champion.
    ///
    /// Validates the artifact and metrics, then copies both into
    /// registry storage, publishes the serving alias, and appends a
    /// promotion event. Fails fast with [`RegistryError::LockHeld`]
    /// when another mutation is in flight.
    pub fn commit(
        &self,
        candidate_id: &str,
        artifact_path: &Path,
        metrics: &MetricsDocument,
    ) -> Result<LedgerEvent, RegistryError> {
        let metric_name = &self.settings.primary_metric;
        let metric_value = metrics
            .metric(metric_name)
            .filter(|v| v.is_finite())
            .ok_or_else(|| RegistryError::InvalidMetrics { metric: metric_name.clone() })?;

        if !artifact_path.is_file() {
            return Err(RegistryError::ArtifactMissing { path: artifact_path.to_path_buf() });
        }

        self.ensure_dirs()?;
        let mut lock = self.acquire_lock()?;
        let _guard = lock
            .try_write()
            .map_err(|_| RegistryError::LockHeld { path: self.lock_path() })?;

        // A corrupt ledger aborts before anything is written.
        let mut ledger = self.load_ledger()?;

        let artifact_bytes = fs::read(artifact_path).map_err(|e| {
            RegistryError::io(format!("reading artifact {}", artifact_path.display()), e)
        })?;
        let digest = format!("sha256-{:x}", Sha256::digest(&artifact_bytes));

        let now = Utc::now();
        let artifact_id = format!("{candidate_id}_{}", now.format("%Y%m%dT%H%M%SZ"));
        let ext = artifact_path.extension().and_then(|e| e.to_str()).unwrap_or("bin");

        // Immutable, timestamp-keyed copies of the artifact and its
        // metrics inside the registry.
        let stored_artifact = self.settings.registry_dir.join(format!("{artifact_id}.{ext}"));
        write_atomic(&stored_artifact, &artifact_bytes).map_err(|e| {
            RegistryError::io(format!("storing artifact {}", stored_artifact.display()), e)
        })?;

        let stored_metrics = self.settings.registry_dir.join(format!("{artifact_id}.json"));
        let metrics_bytes = serde_json::to_vec_pretty(metrics.as_value())
            .map_err(|e| RegistryError::CorruptLedger { message: format!("serializing metrics: {e}") })?;
        write_atomic(&stored_metrics, &metrics_bytes).map_err(|e| {
            RegistryError::io(format!("storing metrics {}", stored_metrics.display()), e)
        })?;

        // Publish the serving alias. From here on a reader sees either
        // the old champion or the new one, never a torn file.
        write_atomic(&self.settings.alias_path, &artifact_bytes).map_err(|e| {
            RegistryError::io(
                format!("publishing alias {}", self.settings.alias_path.display()),
                e,
            )
        })?;

        let event = LedgerEvent {
            kind: EventKind::Promotion,
            artifact_id,
            previous_champion_id: ledger.champion_event().map(|e| e.artifact_id.clone()),
            metric_name: metric_name.clone(),
            metric_value,
            sha256: digest,
            registry_path: stored_artifact,
            timestamp: now,
        };
        ledger.append_promotion(event.clone());
        ledger.save(&self.ledger_path())?;

        Ok(event)
    }

    /// Restore the previous champion.
    ///
    /// The restored artifact comes from its immutable registry copy and
    /// is published with the same temp+rename discipline as a commit.
    pub fn rollback(&self) -> Result<LedgerEvent, RegistryError> {
        self.ensure_dirs()?;
        let mut lock = self.acquire_lock()?;
        let _guard = lock
            .try_write()
            .map_err(|_| RegistryError::LockHeld { path: self.lock_path() })?;

        let mut ledger = self.load_ledger()?;
        let target_idx = ledger.rollback_target()?;
        let target = ledger.events[target_idx].clone();
        let current = ledger
            .champion_event()
            .expect("rollback_target checked the champion exists")
            .clone();

        let artifact_bytes = fs::read(&target.registry_path)
            .map_err(|_| RegistryError::ArtifactMissing { path: target.registry_path.clone() })?;
        write_atomic(&self.settings.alias_path, &artifact_bytes).map_err(|e| {
            RegistryError::io(
                format!("publishing alias {}", self.settings.alias_path.display()),
                e,
            )
        })?;

        let audit = LedgerEvent {
            kind: EventKind::Rollback,
            artifact_id: target.artifact_id.clone(),
            previous_champion_id: Some(current.artifact_id),
            metric_name: target.metric_name.clone(),
            metric_value: target.metric_value,
            sha256: target.sha256.clone(),
            registry_path: target.registry_path.clone(),
            timestamp: Utc::now(),
        };
        ledger.apply_rollback(audit.clone(), target_idx);
        ledger.save(&self.ledger_path())?;

        Ok(audit)
    }

    fn ensure_dirs(&self) -> Result<(), RegistryError> {
        fs::create_dir_all(&self.settings.registry_dir).map_err(|e| {
            RegistryError::io(
                format!("creating registry dir {}", self.settings.registry_dir.display()),
                e,
            )
        })?;
        if let Some(parent) = self.settings.alias_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    RegistryError::io(format!("creating alias dir {}", parent.display()), e)
                })?;
            }
        }
        Ok(())
    }

    fn acquire_lock(&self) -> Result<fd_lock::RwLock<File>, RegistryError> {
        let file = File::options()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())
            .map_err(|e| {
                RegistryError::io(format!("opening lock {}", self.lock_path().display()), e)
            })?;
        Ok(fd_lock::RwLock::new(file))
    }
}
