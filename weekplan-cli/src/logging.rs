//! Logging setup using `tracing` + `tracing-subscriber`.
//!
//! Level selection, first match wins:
//! 1. `--log-level` flag
//! 2. `WEEKPLAN_LOG` (an env-filter directive, e.g. "debug" or
//!    "weekplan_core=trace")
//! 3. `warn`
//!
//! Output goes to stderr so `--json` output on stdout stays clean.

use anyhow::{Result, anyhow};
use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "WEEKPLAN_LOG";

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn directive(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

fn build_filter(cli_level: Option<LogLevel>) -> EnvFilter {
    match cli_level {
        Some(lvl) => EnvFilter::new(lvl.directive()),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(cli_level))
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))
}

