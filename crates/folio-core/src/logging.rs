//! Tracing setup.
//!
//! The card owns the terminal while it runs, so logs go to a file under
//! `${FOLIO_HOME}/logs` instead of stderr. Filtering follows `FOLIO_LOG`
//! (same syntax as `RUST_LOG`), defaulting to `info`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "FOLIO_LOG";
pub const LOG_FILE: &str = "folio.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber writing to `dir/folio.log`.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(guard)
}
