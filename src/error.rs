//! Error types with actionable diagnostics.
//!
//! Structural problems abort the whole run: unreadable input files, a
//! missing primary column, lock contention, invalid candidate metrics.
//! Per-feature numeric degeneracies never surface here; they are
//! recorded in the drift report as skipped features and the run keeps
//! going.

use std::path::Path;
use thiserror::Error;

use crate::registry::{PromotionError, RegistryError};

/// Result type alias for vigilar operations.
pub type Result<T> = std::result::Result<T, VigilarError>;

/// Errors that abort a batch run.
///
/// Every variant maps to the operational-error exit class; a FAIL
/// drift verdict is not an error and is reported through
/// [`crate::cli::Verdict`] instead.
#[derive(Error, Debug)]
pub enum VigilarError {
    /// Input file missing, empty, or unparseable as a whole.
    #[error("Invalid input: {message}")]
    Input { message: String },

    /// A required column is absent.
    #[error("Missing column '{column}' in {context}")]
    Schema { column: String, context: String },

    /// A configuration value is out of range.
    #[error("Invalid configuration value for '{field}': {message}")]
    Config { field: String, message: String },

    /// Registry operation failed; prior state left intact.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Promotion decision failed; nothing was mutated.
    #[error(transparent)]
    Promotion(#[from] PromotionError),

    /// IO error with context.
    #[error("IO error: {context}\n  Cause: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Report or ledger (de)serialization failure.
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl VigilarError {
    /// Create an input error referencing a file path.
    pub fn input_at(path: &Path, message: impl Into<String>) -> Self {
        Self::Input { message: format!("{}: {}", path.display(), message.into()) }
    }

    /// Create an input error without a path.
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input { message: message.into() }
    }

    /// Create an IO error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io { context: context.into(), source }
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Input { .. } => "E001",
            Self::Schema { .. } => "E002",
            Self::Config { .. } => "E003",
            Self::Registry(_) => "E010",
            Self::Promotion(_) => "E011",
            Self::Io { .. } => "E050",
            Self::Serialization { .. } => "E051",
        }
    }
}
