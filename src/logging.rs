//! Logging flags and subscriber setup.

use std::env;

use clap::Args;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Target every crate-scoped level directive applies to.
const TARGET: &str = "jumble";

/// Logging controls shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub(crate) struct LogArgs {
    /// Set log level to trace (jumble only)
    #[arg(long, global = true, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub(crate) trace: bool,

    /// Set log level to debug (jumble only)
    #[arg(long, global = true, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub(crate) debug: bool,

    /// Set a single log level for jumble (error|warn|info|debug|trace)
    #[arg(long, global = true)]
    pub(crate) log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "jumble::layout=trace,jumble=info"
    #[arg(long, global = true)]
    pub(crate) log_filter: Option<String>,
}

fn level_spec_for(level: &str) -> String {
    format!("{}={}", TARGET, level.to_ascii_lowercase())
}

/// Final filter spec with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG`
/// - crate-scoped `info`
pub(crate) fn compute_spec(args: &LogArgs) -> String {
    spec_with_env(args, env::var("RUST_LOG").ok())
}

fn spec_with_env(args: &LogArgs, rust_log: Option<String>) -> String {
    if let Some(spec) = &args.log_filter {
        return spec.clone();
    }
    if args.trace {
        return level_spec_for("trace");
    }
    if args.debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = &args.log_level {
        return level_spec_for(lvl);
    }
    rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| level_spec_for("info"))
}

/// Install the global subscriber.  A second call is a no-op.
pub(crate) fn init(args: &LogArgs) {
    let spec = compute_spec(args);
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(&spec))
        .with(fmt::layer().without_time().with_target(false))
        .try_init();
}
