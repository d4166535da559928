//! Vigilar: drift monitoring and model promotion for churn prediction
//! pipelines.
//!
//! Three batch operations around one piece of durable state:
//!
//! - **Drift check** — compares current feature distributions against
//!   the training baseline with a per-feature Population Stability
//!   Index and aggregates a PASS/WARN/FAIL verdict.
//! - **Score health** — summarizes a batch of live prediction scores
//!   into percentiles and a high-risk rate, a cheap stand-in for
//!   ground-truth evaluation while labels lag.
//! - **Promotion** — picks the best trained candidate by its primary
//!   metric and atomically makes it the serving champion, with an
//!   append-only ledger and rollback.
//!
//! Each operation runs as its own short-lived process; the drift and
//! score checks are pure readers, and only registry commits mutate
//! shared state, under an exclusive lock with atomic publication.

pub mod cli;
pub mod config;
pub mod drift;
pub mod error;
pub mod io;
pub mod registry;
pub mod score;
pub mod stats;

pub use error::{Result, VigilarError};
