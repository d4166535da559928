//! Vigilar CLI
//!
//! Batch entry point for drift checks, score health, and model
//! promotion.
//!
//! # Usage
//!
//! ```bash
//! # Compare current features against the training baseline
//! vigilar drift --baseline baseline.csv --current current.csv
//!
//! # Summarize a batch of prediction scores
//! vigilar scores --input predictions.csv --threshold 0.7
//!
//! # Promote the best trained candidate
//! vigilar promote --models-dir models --metrics-dir metrics --registry-dir registry
//!
//! # Restore the previous champion
//! vigilar rollback --registry-dir registry --alias models/production_latest.bin
//!
//! # Show promotion history
//! vigilar history --registry-dir registry
//! ```
//!
//! # Exit codes
//!
//! The scheduler reads three distinct classes: `0` for a PASS/WARN
//! verdict or a completed operation, `2` for a FAIL drift verdict, and
//! `1` for operational errors (unreadable input, lock contention,
//! invalid candidates). A FAIL verdict and a broken pipeline must stay
//! distinguishable for alerting.

use clap::Parser;
use std::process::ExitCode;
use vigilar::cli::{run_command, Verdict};
use vigilar::config::Cli;

const EXIT_DRIFT_FAIL: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(Verdict::Healthy) => ExitCode::SUCCESS,
        Ok(Verdict::DriftFail) => ExitCode::from(EXIT_DRIFT_FAIL),
        Err(e) => {
            eprintln!("Error [{}]: {e}", e.code());
            ExitCode::FAILURE
        }
    }
}
