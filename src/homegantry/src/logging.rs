use crate::config::Config;
use anyhow::{Context, Result};
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, time::SystemTime},
    prelude::*,
    EnvFilter,
};

/// Logs to stdout, and additionally to `log_file` when one is configured.
/// `RUST_LOG` takes precedence over the configured level.
pub fn setup_logging(config: &Config) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log_level {:?}", config.log_level))?,
    };

    let stdout_layer = fmt::layer().with_target(true).with_timer(SystemTime);

    let file_layer = config
        .log_file
        .as_deref()
        .map(file_appender)
        .transpose()?
        .map(|appender| {
            fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true)
                .with_target(true)
                .with_level(true)
                .with_timer(SystemTime)
                .with_writer(appender)
        });

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    match &config.log_file {
        Some(path) => tracing::info!("Logging initialized. Also writing to {}", path.display()),
        None => tracing::debug!("Logging initialized"),
    }

    Ok(())
}

fn file_appender(path: &Path) -> Result<RollingFileAppender> {
    let file_name = path
        .file_name()
        .with_context(|| format!("log_file {} has no file name", path.display()))?;
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(directory)
        .with_context(|| format!("failed to create log directory {}", directory.display()))?;
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name.to_string_lossy())
        .build(directory)
        .with_context(|| format!("failed to open log file {}", path.display()))
}
