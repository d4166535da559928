//! CLI argument types.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::types::{OutputFormat, ShellType};

/// Vigilar: drift monitoring and model promotion
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "vigilar")]
#[command(version)]
#[command(about = "Drift monitoring and model promotion for churn prediction pipelines")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Compare current feature data against the training baseline
    Drift(DriftArgs),

    /// Summarize a batch of prediction scores
    Scores(ScoresArgs),

    /// Promote the best trained candidate to the serving alias
    Promote(PromoteArgs),

    /// Restore the previous champion artifact
    Rollback(RollbackArgs),

    /// Show the registry's promotion history
    History(HistoryArgs),

    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Arguments for the drift command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct DriftArgs {
    /// Baseline feature CSV (training reference)
    #[arg(long, value_name = "CSV")]
    pub baseline: PathBuf,

    /// Current feature CSV to compare
    #[arg(long, value_name = "CSV")]
    pub current: PathBuf,

    /// Number of baseline-quantile buckets
    #[arg(long, default_value = "10")]
    pub buckets: usize,

    /// WARN threshold on the maximum PSI (inclusive)
    #[arg(long, default_value = "0.1")]
    pub warn: f64,

    /// FAIL threshold on the maximum PSI (inclusive)
    #[arg(long, default_value = "0.25")]
    pub fail: f64,

    /// Floor substituted for empty buckets
    #[arg(long, default_value = "1e-6")]
    pub epsilon: f64,

    /// Write the JSON report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the scores command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct ScoresArgs {
    /// Prediction CSV with a score column
    #[arg(long, value_name = "CSV")]
    pub input: PathBuf,

    /// Name of the score column
    #[arg(long, default_value = "score")]
    pub column: String,

    /// Scores at or above this value count as high risk
    #[arg(long, default_value = "0.7")]
    pub threshold: f64,

    /// Write the JSON report to this path
    #[arg(long, value_name = "PATH")]
    pub report: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the promote command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct PromoteArgs {
    /// Directory holding trained model artifacts
    #[arg(long, value_name = "DIR")]
    pub models_dir: PathBuf,

    /// Directory holding candidate metrics files
    #[arg(long, value_name = "DIR")]
    pub metrics_dir: PathBuf,

    /// Registry directory (ledger, lock, stored artifacts)
    #[arg(long, value_name = "DIR")]
    pub registry_dir: PathBuf,

    /// Serving alias path (default: <models-dir>/production_latest.bin)
    #[arg(long, value_name = "PATH")]
    pub alias: Option<PathBuf>,

    /// Primary metric used to pick the winner (higher is better)
    #[arg(long, default_value = "pr_auc")]
    pub metric: String,

    /// Model family to consider; repeat for several
    #[arg(long = "family", value_name = "NAME")]
    pub families: Vec<String>,
}

impl PromoteArgs {
    /// Model families, falling back to the two the training step
    /// produces.
    pub fn families_or_default(&self) -> Vec<String> {
        if self.families.is_empty() {
            vec!["baseline_logreg".into(), "candidate_hgb".into()]
        } else {
            self.families.clone()
        }
    }

    /// Alias path, defaulting next to the model artifacts.
    pub fn alias_or_default(&self) -> PathBuf {
        self.alias.clone().unwrap_or_else(|| self.models_dir.join("production_latest.bin"))
    }
}

/// Arguments for the rollback command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct RollbackArgs {
    /// Registry directory (ledger, lock, stored artifacts)
    #[arg(long, value_name = "DIR")]
    pub registry_dir: PathBuf,

    /// Serving alias path to repoint
    #[arg(long, value_name = "PATH")]
    pub alias: PathBuf,
}

/// Arguments for the history command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct HistoryArgs {
    /// Registry directory
    #[arg(long, value_name = "DIR")]
    pub registry_dir: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the completion command
#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_name = "SHELL")]
    pub shell: ShellType,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
