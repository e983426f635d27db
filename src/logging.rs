use crate::config::LoggingConfig;
use fs_err::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install a global subscriber that appends log messages to the configured
/// log file.  The terminal belongs to the UI, so nothing is ever logged to
/// stderr.
///
/// Returns `Ok(false)` without installing anything if no log file is
/// configured.
pub(crate) fn init(config: &LoggingConfig) -> Result<bool, LoggingError> {
    let Some(path) = config.file.as_deref() else {
        return Ok(false);
    };
    let file = open_log(path)?;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false),
        )
        .with(config.level)
        .try_init()
        .map_err(|_| LoggingError::Init)?;
    tracing::debug!(path = %path.display(), level = %config.level, "logging initialized");
    Ok(true)
}

fn open_log(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(LoggingError::Open)
}

#[derive(Debug, Error)]
pub(crate) enum LoggingError {
    #[error("failed to open log file")]
    Open(#[source] std::io::Error),
    #[error("a global logger has already been installed")]
    Init,
}
