//! Tracing subscriber setup for host applications.
//!
//! The library itself only emits `tracing` events; a host calls [`init`] once
//! at startup. `RUST_LOG` overrides the configured level.
//!
//! With `file = true`, logs go to a single never-rotated file:
//!   Linux    ~/.local/share/floorplan/floorplan.log
//!   macOS    ~/Library/Application Support/floorplan/floorplan.log
//!   Windows  %LOCALAPPDATA%\floorplan\floorplan.log
//! unless `directory` points elsewhere.

use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub const LOG_FILE_NAME: &str = "floorplan.log";

/// Directory the file writer logs into for `config`.
pub fn log_directory(config: &LoggingConfig) -> PathBuf {
    config
        .directory
        .clone()
        .unwrap_or_else(|| dirs::data_local_dir().unwrap_or_default().join("floorplan"))
}

fn env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber.
///
/// Returns the file writer's guard when logging to a file; the host must keep
/// it alive or buffered lines are lost. Calling this again after a subscriber
/// is installed is a no-op.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = env_filter(config);

    if !config.file {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        return None;
    }

    let log_dir = log_directory(config);
    // The appender panics if it cannot open its file, so create the directory first.
    if let Err(e) = std::fs::create_dir_all(&log_dir) {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::warn!(dir = %log_dir.display(), error = %e, "cannot create log directory, logging to stderr");
        return None;
    }

    let file_appender = tracing_appender::rolling::never(&log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(non_blocking)
        .try_init()
        .is_ok();

    if installed {
        tracing::info!(dir = %log_dir.display(), "file logging started");
    }
    Some(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_directory_wins() {
        let config = LoggingConfig {
            directory: Some(PathBuf::from("/var/log/floorplan")),
            ..LoggingConfig::default()
        };
        assert_eq!(log_directory(&config), PathBuf::from("/var/log/floorplan"));
    }

    #[test]
    fn default_directory_is_app_specific() {
        let dir = log_directory(&LoggingConfig::default());
        assert!(dir.ends_with("floorplan"));
    }

    #[test]
    fn init_twice_does_not_panic() {
        let config = LoggingConfig::default();
        assert!(init(&config).is_none());
        assert!(init(&config).is_none());
    }
}
