//! Logging infrastructure for filesigner
//!
//! Logs go to stderr (stdout is reserved for command output) and, when
//! enabled in the config, to daily-rotating files in the app data directory.
//!
//! ## Usage
//!
//! ```no_run
//! use filesigner::config::LoggingConfig;
//! use filesigner::logging;
//!
//! // Initialize once at startup
//! logging::init(&LoggingConfig::default()).expect("Failed to initialize logging");
//!
//! tracing::info!("Ready");
//! ```

use crate::config::LoggingConfig;
use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Log directory under a platform data directory.
pub fn log_dir_in(base_dir: &Path) -> PathBuf {
    base_dir.join("filesigner").join("logs")
}

/// Gets the log directory path based on platform conventions, creating it
///
/// Returns:
/// - Windows: `%APPDATA%/filesigner/logs`
/// - macOS: `~/Library/Application Support/filesigner/logs`
/// - Linux: `~/.local/share/filesigner/logs`
///
/// # Errors
///
/// Returns error if the platform has no data directory or the log
/// directory cannot be created
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = log_dir_in(&base_dir);

    if !log_dir.exists() {
        std::fs::create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;
    }

    Ok(log_dir)
}

/// Initializes the logging system
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.level`. With `config.file` set, a `filesigner.<date>.log` file
/// rotating daily (10 files kept) receives the same events.
///
/// # Errors
///
/// Returns error if the filter is invalid, the log directory cannot be
/// created, or the file appender fails
pub fn init(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .with_context(|| format!("Invalid log level: {}", config.level))?;

    let stderr_layer = fmt::layer()
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr);

    let file_layer = if config.file {
        let log_dir = get_log_dir()?;
        let appender = RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .max_log_files(10)
            .filename_prefix("filesigner")
            .filename_suffix("log")
            .build(&log_dir)
            .context("Failed to create log file appender")?;

        Some(
            fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_file(true)
                .with_ansi(false)
                .with_writer(appender)
                .boxed(),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Logging already initialized")?;

    tracing::debug!("Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_dir_in() {
        let log_dir = log_dir_in(Path::new("/data"));
        assert!(log_dir.ends_with("filesigner/logs"));
    }
}
