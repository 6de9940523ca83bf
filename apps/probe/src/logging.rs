//! Logging initialization

use crate::config::LoggingConfig;
use crate::error::{Error, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Keeps the file writer alive. Drop it only once the run is over.
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// `RUST_LOG` takes precedence over `logging.level` when set.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| Error::Config(format!("invalid logging.level '{}': {e}", config.level)))?;

    let console = if config.json {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let (file_layer, file_guard) = if config.file_enabled {
        let appender =
            tracing_appender::rolling::daily(&config.file_directory, &config.file_prefix);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let layer = fmt::layer()
            .json()
            .with_ansi(false)
            .with_writer(writer)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| Error::Config(format!("failed to install tracing subscriber: {e}")))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}
