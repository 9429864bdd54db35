//! Diagnostic logging setup.
//!
//! Diagnostics go to stderr through `tracing-subscriber`, so stdout carries
//! only report lines. The filter comes from `--log-level`, then `RUST_LOG`,
//! then defaults to `warn`. With `--log-file` a second, non-blocking writer
//! appends plain-text events to that file.

use std::fs::OpenOptions;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::CliError;

/// Filter used when neither `--log-level` nor `RUST_LOG` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Build the event filter.
pub fn build_filter(level: Option<&str>) -> Result<EnvFilter, CliError> {
    match level {
        Some(directives) => EnvFilter::try_new(directives)
            .map_err(|e| CliError::Logging(format!("invalid log filter '{}': {}", directives, e))),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))),
    }
}

/// Install the global subscriber.
///
/// The returned guard flushes the file writer on drop and must be held
/// until the program exits.
pub fn init_logging(
    level: Option<&str>,
    log_file: Option<&Path>,
) -> Result<Option<WorkerGuard>, CliError> {
    let filter = build_filter(level)?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    CliError::Logging(format!("cannot open {}: {}", path.display(), e))
                })?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| CliError::Logging(e.to_string()))?;

    Ok(guard)
}
