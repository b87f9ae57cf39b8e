//! Logging system initialization
//!
//! Sets up the tracing subscriber from the loaded configuration: console or
//! file output, optional daily rotation, fmt or JSON formatting.

use std::io::Write;
use std::path::Path;

use tracing_appender::rolling;

use crate::config::{AppConfig, LoggingConfig};

fn file_writer(path: &str, logging: &LoggingConfig) -> Box<dyn Write + Send + Sync> {
    if logging.enable_rotation {
        let dir = Path::new(path).parent().unwrap_or(Path::new("."));
        let prefix = Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("gatelink.log")
            .trim_end_matches(".log");
        let appender = rolling::Builder::new()
            .rotation(rolling::Rotation::DAILY)
            .filename_prefix(prefix)
            .filename_suffix("log")
            .max_log_files(logging.max_backups as usize)
            .build(dir)
            .expect("Failed to create rolling log appender");
        Box::new(appender)
    } else {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .expect("Failed to open log file");
        Box::new(file)
    }
}

/// Initialize logging based on configuration.
///
/// Call once during startup, after the configuration has been loaded. The
/// returned guard must be kept alive for the duration of the program so
/// non-blocking log writes are flushed.
///
/// # Panics
/// * If creating the log appender fails
/// * If the global subscriber is already set
pub fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    let log_file = config
        .logging
        .file
        .as_deref()
        .filter(|path| !path.is_empty());

    let writer: Box<dyn Write + Send + Sync> = match log_file {
        Some(path) => file_writer(path, &config.logging),
        None => Box::new(std::io::stdout()),
    };

    let (non_blocking_writer, guard) = tracing_appender::non_blocking(writer);
    let filter = tracing_subscriber::EnvFilter::new(config.logging.level.clone());

    let builder = tracing_subscriber::fmt()
        .with_writer(non_blocking_writer)
        .with_env_filter(filter)
        .with_level(true)
        // ANSI colors only make sense on a terminal, not in a log file.
        .with_ansi(log_file.is_none());

    if config.logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }

    guard
}
