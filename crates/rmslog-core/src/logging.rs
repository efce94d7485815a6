//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "RMSLOG_LOG";

const LOG_FILE_NAME: &str = "rmslog.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/rms-log-outline/logs/`
/// Log level is controlled by the `RMSLOG_LOG` environment variable.
///
/// # Examples
/// ```bash
/// RMSLOG_LOG=debug rmslog outline run.html --log
/// RMSLOG_LOG=rmslog_core=trace rmslog blocks run.html --log
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    // Default to info for our crates, allow override via RMSLOG_LOG
    let env_filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new("rmslog=info,rmslog_core=info,rmslog_app=info,warn"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .try_init()
        .map_err(|e| Error::logging(e.to_string()))?;

    tracing::info!("RMS log outline starting");
    tracing::info!("Log directory: {}", log_dir.display());

    Ok(())
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("rms-log-outline").join("logs"))
}
