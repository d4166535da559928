//! Rollback command implementation

use crate::cli::commands::Verdict;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{RegistrySettings, RollbackArgs};
use crate::error::Result;
use crate::registry::ModelRegistry;

pub fn run_rollback(args: RollbackArgs, level: LogLevel) -> Result<Verdict> {
    let settings = RegistrySettings {
        registry_dir: args.registry_dir.clone(),
        alias_path: args.alias.clone(),
        // The metric name is only recorded on promotion; rollback
        // reuses whatever the restored event carried.
        primary_metric: String::new(),
    };

    let registry = ModelRegistry::new(settings);
    let event = registry.rollback()?;

    log(
        level,
        LogLevel::Normal,
        &format!("Restored {} as champion", event.artifact_id),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Production alias updated -> {}", args.alias.display()),
    );

    Ok(Verdict::Healthy)
}
