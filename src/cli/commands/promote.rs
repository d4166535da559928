//! Promote command implementation

use crate::cli::commands::Verdict;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{PromoteArgs, PromotionSettings, RegistrySettings};
use crate::error::Result;
use crate::registry::{ModelRegistry, PromotionDecisionEngine};

pub fn run_promote(args: PromoteArgs, level: LogLevel) -> Result<Verdict> {
    let settings = PromotionSettings {
        models_dir: args.models_dir.clone(),
        metrics_dir: args.metrics_dir.clone(),
        families: args.families_or_default(),
        registry: RegistrySettings {
            registry_dir: args.registry_dir.clone(),
            alias_path: args.alias_or_default(),
            primary_metric: args.metric.clone(),
        },
    };

    log(
        level,
        LogLevel::Normal,
        &format!("Promoting best model using primary metric '{}'", args.metric),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!("  Families: {}", settings.families.join(", ")),
    );

    let registry = ModelRegistry::new(settings.registry.clone());
    let engine = PromotionDecisionEngine::new(settings.clone());
    let event = engine.run(&registry)?;

    log(
        level,
        LogLevel::Normal,
        &format!(
            "Promoted {} ({} = {:.4})",
            event.artifact_id, event.metric_name, event.metric_value
        ),
    );
    log(
        level,
        LogLevel::Normal,
        &format!("Production alias updated -> {}", settings.registry.alias_path.display()),
    );

    Ok(Verdict::Healthy)
}
