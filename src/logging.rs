//! Diagnostics bootstrap.
//!
//! Diagnostics go through the `log` facade to stderr, so they never mix with
//! the to-do listing on stdout. `RUST_LOG` overrides the configured level.
//! Initialization happens at most once per process.

use std::sync::Mutex;

use anyhow::{Context, Result};
use flexi_logger::{Logger, LoggerHandle};
use log::info;

static LOGGER: Mutex<Option<LoggerHandle>> = Mutex::new(None);

/// Start logging at `level` (e.g. `"warn"`, `"debug"`, `"todos=trace"`)
///
/// Calling this again after a successful start is a no-op.
///
/// # Errors
///
/// Returns an error when the level spec is invalid or the logger backend
/// cannot be started.
pub fn init_logging(level: &str) -> Result<()> {
    let mut slot = LOGGER.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.is_some() {
        return Ok(());
    }

    let handle = Logger::try_with_env_or_str(level)
        .with_context(|| format!("Invalid log level: {}", level))?
        .log_to_stderr()
        .format(flexi_logger::default_format)
        .start()
        .context("Failed to start logger")?;

    info!("event=app_start version={} level={}", env!("CARGO_PKG_VERSION"), level);
    *slot = Some(handle);
    Ok(())
}
