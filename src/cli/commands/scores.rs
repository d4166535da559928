//! Scores command implementation

use crate::cli::commands::Verdict;
use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{OutputFormat, ScoreSettings, ScoresArgs};
use crate::error::{Result, VigilarError};
use crate::io::{write_atomic, FeatureTable};
use crate::score::{ScoreHealthAnalyzer, ScoreReport};

pub fn run_scores(args: ScoresArgs, level: LogLevel) -> Result<Verdict> {
    let settings = ScoreSettings { column: args.column.clone(), high_risk_threshold: args.threshold };
    settings.validate()?;

    log(level, LogLevel::Normal, &format!("Scores: {}", args.input.display()));

    let table = FeatureTable::from_csv_path(&args.input)?;
    let scores = table.column(&settings.column).ok_or_else(|| VigilarError::Schema {
        column: settings.column.clone(),
        context: args.input.display().to_string(),
    })?;

    let report = ScoreHealthAnalyzer::new(settings).analyze(scores)?;

    match args.format {
        OutputFormat::Text => print_text(&report, level),
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|e| VigilarError::Serialization { message: e.to_string() })?;
            println!("{json}");
        }
    }

    if let Some(path) = &args.report {
        let bytes = serde_json::to_vec_pretty(&report)
            .map_err(|e| VigilarError::Serialization { message: e.to_string() })?;
        write_atomic(path, &bytes)
            .map_err(|e| VigilarError::io(format!("writing report {}", path.display()), e))?;
        log(level, LogLevel::Normal, &format!("Report written to {}", path.display()));
    }

    Ok(Verdict::Healthy)
}

fn print_text(report: &ScoreReport, level: LogLevel) {
    log(level, LogLevel::Normal, "Score Health Summary:");
    log(level, LogLevel::Normal, &format!("  Samples: {}", report.sample_count));
    log(level, LogLevel::Normal, &format!("  Mean: {:.4}", report.mean));
    log(
        level,
        LogLevel::Normal,
        &format!("  p50/p90/p99: {:.4} / {:.4} / {:.4}", report.p50, report.p90, report.p99),
    );
    log(
        level,
        LogLevel::Normal,
        &format!(
            "  High risk (>= {}): {:.2}%",
            report.threshold,
            report.high_risk_rate * 100.0
        ),
    );
}
