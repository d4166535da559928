//! History command implementation

use crate::cli::commands::Verdict;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{HistoryArgs, OutputFormat, RegistrySettings};
use crate::error::{Result, VigilarError};
use crate::registry::{EventKind, ModelRegistry};

pub fn run_history(args: HistoryArgs, level: LogLevel) -> Result<Verdict> {
    let settings = RegistrySettings {
        registry_dir: args.registry_dir.clone(),
        // History only reads the ledger; the alias and metric are not
        // consulted.
        alias_path: args.registry_dir.join("unused"),
        primary_metric: String::new(),
    };

    let registry = ModelRegistry::new(settings);
    let ledger = registry.load_ledger()?;

    if args.format == OutputFormat::Json {
        let json = serde_json::to_string_pretty(&ledger)
            .map_err(|e| VigilarError::Serialization { message: e.to_string() })?;
        println!("{json}");
        return Ok(Verdict::Healthy);
    }

    if ledger.events.is_empty() {
        log(level, LogLevel::Normal, "Registry is empty: no promotions yet");
        return Ok(Verdict::Healthy);
    }

    log(level, LogLevel::Normal, "Promotion History:");
    for (idx, event) in ledger.events.iter().enumerate() {
        let marker = if ledger.champion == Some(idx) { "*" } else { " " };
        let kind = match event.kind {
            EventKind::Promotion => "promote",
            EventKind::Rollback => "rollback",
        };
        log(
            level,
            LogLevel::Normal,
            &format!(
                "{marker} {} {kind:8} {} ({} = {:.4})",
                event.timestamp.format("%Y-%m-%d %H:%M:%S"),
                event.artifact_id,
                event.metric_name,
                event.metric_value
            ),
        );
    }
    if let Some(event) = ledger.champion_event() {
        log(level, LogLevel::Normal, &format!("Current champion: {}", event.artifact_id));
    }

    Ok(Verdict::Healthy)
}
