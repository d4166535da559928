//! Configuration: CLI argument structs and validated settings.
//!
//! Every component receives its settings explicitly through its
//! constructor; nothing reads thresholds or paths from ambient state.

mod cli;
mod settings;
mod types;

pub use cli::{
    Cli, Command, CompletionArgs, DriftArgs, HistoryArgs, PromoteArgs, RollbackArgs, ScoresArgs,
};
pub use cli::parse_args;
pub use settings::{DriftSettings, PromotionSettings, RegistrySettings, ScoreSettings};
pub use types::{OutputFormat, ShellType};
