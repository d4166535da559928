//! Drift command implementation

use crate::cli::commands::Verdict;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{DriftArgs, DriftSettings, OutputFormat};
use crate::drift::{DriftReport, DriftStatus, PsiDriftAnalyzer};
use crate::error::{Result, VigilarError};
use crate::io::{write_atomic, FeatureTable};

pub fn run_drift(args: DriftArgs, level: LogLevel) -> Result<Verdict> {
    let settings = DriftSettings {
        bucket_count: args.buckets,
        warn_threshold: args.warn,
        fail_threshold: args.fail,
        epsilon: args.epsilon,
    };
    settings.validate()?;

    log(level, LogLevel::Normal, &format!("Baseline: {}", args.baseline.display()));
    log(level, LogLevel::Normal, &format!("Current:  {}", args.current.display()));

    let baseline = FeatureTable::from_csv_path(&args.baseline)?;
    let current = FeatureTable::from_csv_path(&args.current)?;

    let report = PsiDriftAnalyzer::new(settings).analyze(&baseline, &current)?;

    match args.format {
        OutputFormat::Text => print_text(&report, level),
        OutputFormat::Json => print_json(&report)?,
    }

    // The report lands on disk even for a FAIL verdict; the exit code
    // is the scheduler's signal, the report is the operator's.
    if let Some(path) = &args.report {
        let bytes = serde_json::to_vec_pretty(&report)
            .map_err(|e| VigilarError::Serialization { message: e.to_string() })?;
        write_atomic(path, &bytes)
            .map_err(|e| VigilarError::io(format!("writing report {}", path.display()), e))?;
        log(level, LogLevel::Normal, &format!("Report written to {}", path.display()));
    }

    if report.status == DriftStatus::Fail {
        return Ok(Verdict::DriftFail);
    }
    Ok(Verdict::Healthy)
}

fn print_text(report: &DriftReport, level: LogLevel) {
    log(level, LogLevel::Normal, "Drift Check Results:");
    log(level, LogLevel::Normal, &format!("  Max PSI: {:.4}", report.max_psi));
    log(
        level,
        LogLevel::Normal,
        &format!(
            "  Thresholds: warn >= {}, fail >= {}",
            report.thresholds.warn, report.thresholds.fail
        ),
    );
    log(level, LogLevel::Normal, &format!("  Status: {}", report.status));

    for feature in report.scored() {
        let (psi, status) = (feature.psi.unwrap_or_default(), feature.status);
        let status = status.map_or("", |s| s.as_str());
        log(
            level,
            LogLevel::Verbose,
            &format!("  {}: PSI {psi:.4} ({status})", feature.name),
        );
    }
    for feature in report.skipped() {
        let reason = feature.skip_reason.map(|r| r.to_string()).unwrap_or_default();
        log(level, LogLevel::Normal, &format!("  Skipped {}: {reason}", feature.name));
    }
}

fn print_json(report: &DriftReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| VigilarError::Serialization { message: e.to_string() })?;
    println!("{json}");
    Ok(())
}
