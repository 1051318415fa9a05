//! Logging setup
//!
//! [`Logging::init`] builds a subscriber with two sinks: the console
//! (stderr) and a size-rotated file under the configured directory. Lines
//! look like `2024-05-01 12:00:00 - ERROR - Error getting stores: 403 - ...`.
//!
//! The returned [`Logging`] handle owns the file worker and the subscriber
//! registration; events are recorded for as long as it is alive on the
//! current thread, and buffered lines are flushed when it is dropped.

mod format;
mod rolling;

pub use format::LineFormat;
pub use rolling::SizeRollingWriter;

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::subscriber::DefaultGuard;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Live logging configuration
pub struct Logging {
    log_path: PathBuf,
    _subscriber: DefaultGuard,
    _file_worker: WorkerGuard,
}

impl Logging {
    /// Install console and file sinks for the current thread
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let writer = SizeRollingWriter::new(
            &config.dir,
            &config.file_name,
            config.max_file_bytes,
            config.max_backups,
        )?;
        let log_path = writer.path();
        let (file_writer, file_worker) = tracing_appender::non_blocking(writer);

        let filter = match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => EnvFilter::try_new(&config.level)
                .map_err(|e| Error::invalid_value("logging.level", e.to_string()))?,
        };

        let file_layer = fmt::layer()
            .event_format(LineFormat::default())
            .with_writer(file_writer);

        let console_layer = config.console.then(|| {
            fmt::layer()
                .event_format(LineFormat::default())
                .with_writer(std::io::stderr)
        });

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .with(console_layer);

        Ok(Self {
            log_path,
            _subscriber: tracing::subscriber::set_default(subscriber),
            _file_worker: file_worker,
        })
    }

    /// Path of the active log file
    pub fn log_path(&self) -> &Path {
        &self.log_path
    }
}

impl std::fmt::Debug for Logging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logging")
            .field("log_path", &self.log_path)
            .finish_non_exhaustive()
    }
}
