//! Append-only promotion ledger.
//!
//! The ledger is the arena of promotion history and `champion` is an
//! index into it: exactly one event is pointed at once promotion has
//! happened at least once. Events are only ever appended; rollback
//! appends an audit event and moves the pointer back, it never
//! rewrites history.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::io::write_atomic;
use crate::registry::error::RegistryError;

/// What an event records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A candidate became champion.
    Promotion,
    /// A previous champion was restored.
    Rollback,
}

/// Artifact lifecycle, derived from ledger position rather than stored
/// per artifact so no state flip can be left half-done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    Candidate,
    Champion,
    Retired,
}

/// One ledger entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEvent {
    pub kind: EventKind,
    /// Timestamp-keyed identifier of the stored artifact copy. A
    /// rollback event records the restored artifact here.
    #[serde(rename = "promoted_artifact_id")]
    pub artifact_id: String,
    /// Champion at the time of this event, for rollback.
    pub previous_champion_id: Option<String>,
    pub metric_name: String,
    pub metric_value: f64,
    /// `sha256-` prefixed digest of the artifact bytes.
    pub sha256: String,
    /// Immutable stored copy inside the registry directory.
    pub registry_path: std::path::PathBuf,
    pub timestamp: DateTime<Utc>,
}

/// Promotion history plus the current-champion pointer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryLedger {
    pub events: Vec<LedgerEvent>,
    pub champion: Option<usize>,
}

impl RegistryLedger {
    /// Load a ledger document. A missing file is an empty ledger; an
    /// unparseable or inconsistent one is an error, never silently
    /// reset.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let bytes = std::fs::read(path)
            .map_err(|e| RegistryError::io(format!("reading ledger {}", path.display()), e))?;
        let ledger: Self = serde_json::from_slice(&bytes).map_err(|e| {
            RegistryError::CorruptLedger { message: format!("{}: {e}", path.display()) }
        })?;
        ledger.validate(path)?;
        Ok(ledger)
    }

    /// Persist atomically so a concurrent reader never sees a torn
    /// document.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let bytes = serde_json::to_vec_pretty(self).map_err(|e| {
            RegistryError::CorruptLedger { message: format!("serializing ledger: {e}") }
        })?;
        write_atomic(path, &bytes)
            .map_err(|e| RegistryError::io(format!("writing ledger {}", path.display()), e))
    }

    fn validate(&self, path: &Path) -> Result<(), RegistryError> {
        if let Some(idx) = self.champion {
            let event = self.events.get(idx).ok_or_else(|| RegistryError::CorruptLedger {
                message: format!("{}: champion index {idx} out of range", path.display()),
            })?;
            if event.kind != EventKind::Promotion {
                return Err(RegistryError::CorruptLedger {
                    message: format!(
                        "{}: champion index {idx} points at a non-promotion event",
                        path.display()
                    ),
                });
            }
        }
        Ok(())
    }

    /// The event whose artifact currently serves, if any promotion has
    /// happened.
    pub fn champion_event(&self) -> Option<&LedgerEvent> {
        self.champion.and_then(|idx| self.events.get(idx))
    }

    /// Append a promotion event and point the champion at it.
    pub fn append_promotion(&mut self, event: LedgerEvent) {
        debug_assert_eq!(event.kind, EventKind::Promotion);
        self.events.push(event);
        self.champion = Some(self.events.len() - 1);
    }

    /// Index of the promotion event to restore on rollback: the
    /// original promotion of the current champion's predecessor.
    pub fn rollback_target(&self) -> Result<usize, RegistryError> {
        let champion_idx = self.champion.ok_or(RegistryError::NothingToRollBack)?;
        let current = self
            .events
            .get(champion_idx)
            .ok_or_else(|| RegistryError::CorruptLedger {
                message: format!("champion index {champion_idx} out of range"),
            })?;
        let previous_id =
            current.previous_champion_id.as_deref().ok_or(RegistryError::NothingToRollBack)?;

        self.events[..champion_idx]
            .iter()
            .rposition(|e| e.kind == EventKind::Promotion && e.artifact_id == previous_id)
            .ok_or_else(|| RegistryError::CorruptLedger {
                message: format!("previous champion '{previous_id}' has no promotion event"),
            })
    }

    /// Append a rollback audit event and repoint the champion at the
    /// restored promotion event.
    pub fn apply_rollback(&mut self, audit: LedgerEvent, target: usize) {
        debug_assert_eq!(audit.kind, EventKind::Rollback);
        self.events.push(audit);
        self.champion = Some(target);
    }

    /// Lifecycle state of an artifact id.
    pub fn state_of(&self, artifact_id: &str) -> LifecycleState {
        if self.champion_event().is_some_and(|e| e.artifact_id == artifact_id) {
            return LifecycleState::Champion;
        }
        let promoted = self
            .events
            .iter()
            .any(|e| e.kind == EventKind::Promotion && e.artifact_id == artifact_id);
        if promoted {
            LifecycleState::Retired
        } else {
            LifecycleState::Candidate
        }
    }
}
