use crate::config::LoggingConfig;
use crate::error::{EtlError, Result};
use std::fs;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initializes the logging system with both console and file output.
///
/// The returned guard flushes the file writer when dropped, so the caller
/// keeps it alive for the whole run.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    // Create a non-blocking file appender for daily log rotation
    let file_appender = file_appender(config)?;
    let (non_blocking_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Create a JSON layer for file logging
    let file_layer = fmt::layer().json().with_writer(non_blocking_writer);

    // Console logs go to stderr; stdout carries echoed rows and the summary
    let console_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    // Respect RUST_LOG if set; otherwise use the configured filter
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .map_err(|e| EtlError::Config(format!("Failed to install log subscriber: {}", e)))?;

    Ok(guard)
}

fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender> {
    fs::create_dir_all(&config.dir).map_err(|e| {
        EtlError::Config(format!(
            "Failed to create log directory '{}': {}",
            config.dir.display(),
            e
        ))
    })?;
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .build(&config.dir)
        .map_err(|e| {
            EtlError::Config(format!(
                "Failed to open log file in '{}': {}",
                config.dir.display(),
                e
            ))
        })
}
