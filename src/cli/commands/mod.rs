//! CLI command implementations

mod completion;
mod drift;
mod history;
mod promote;
mod rollback;
mod scores;

use crate::cli::LogLevel;
use crate::config::{Cli, Command};
use crate::error::Result;

/// Outcome of a successful run, converted to an exit code only at the
/// process boundary. A WARN drift verdict is healthy as far as the
/// scheduler is concerned; only FAIL is distinguished, and it is kept
/// separate from operational errors so alerting can tell "drift
/// detected" apart from "pipeline broken".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// PASS/WARN verdict or a completed registry operation.
    Healthy,
    /// Drift check concluded FAIL. A report was still written.
    DriftFail,
}

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<Verdict> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Drift(args) => drift::run_drift(args, log_level),
        Command::Scores(args) => scores::run_scores(args, log_level),
        Command::Promote(args) => promote::run_promote(args, log_level),
        Command::Rollback(args) => rollback::run_rollback(args, log_level),
        Command::History(args) => history::run_history(args, log_level),
        Command::Completion(args) => completion::run_completion(args, log_level),
    }
}
