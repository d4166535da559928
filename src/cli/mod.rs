//! CLI module for vigilar
//!
//! This module contains all CLI command handlers and utilities.

mod commands;
mod logging;

pub use commands::{run_command, Verdict};
pub use logging::LogLevel;
