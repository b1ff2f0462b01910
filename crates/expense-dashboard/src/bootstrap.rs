use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::{fmt, fmt::writer::BoxMakeWriter, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Map a user-facing level name to an [`EnvFilter`] directive.
///
/// Unknown names are passed through unchanged so that full filter directives
/// (e.g. `expense_data=trace`) still work.
pub fn level_directive(log_level: &str) -> String {
    match log_level.to_uppercase().as_str() {
        "DEBUG" => "debug".to_string(),
        "INFO" => "info".to_string(),
        "WARNING" | "WARN" => "warn".to_string(),
        "ERROR" | "CRITICAL" => "error".to_string(),
        _ => log_level.to_string(),
    }
}

/// Initialise the global `tracing` subscriber.
///
/// Output goes to `log_file` when given (appending).  Otherwise
/// non-interactive runs log to stderr and the dashboard discards log lines,
/// since anything written to the terminal would tear the alternate screen.
pub fn setup_logging(log_level: &str, log_file: Option<&Path>, interactive: bool) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_new(level_directive(log_level)).unwrap_or_else(|_| EnvFilter::new("warn"));

    let (writer, ansi) = make_writer(log_file, interactive)?;
    let layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_ansi(ansi)
        .with_writer(writer);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("failed to initialise logging")?;

    Ok(())
}

/// Pick the log destination.  The flag is whether ANSI colours are wanted.
fn make_writer(log_file: Option<&Path>, interactive: bool) -> anyhow::Result<(BoxMakeWriter, bool)> {
    if let Some(path) = log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("failed to open log file {}", path.display()))?;
        return Ok((BoxMakeWriter::new(Mutex::new(file)), false));
    }

    if interactive {
        Ok((BoxMakeWriter::new(std::io::sink), false))
    } else {
        Ok((BoxMakeWriter::new(std::io::stderr), true))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
